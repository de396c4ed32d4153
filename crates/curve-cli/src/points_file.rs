use std::path::Path;

use anyhow::{bail, Context, Result};
use curve_point::{LegacyField, Point};

/// Parses a simple `frame,x,y[,status]` text format: one point per line,
/// blank lines and `#`-prefixed comments ignored. This is the CLI's only
/// file format — the core itself owns no parser (spec §1: file-format
/// parsers are out of scope for the core, external collaborators' job).
pub fn load(path: &Path) -> Result<Vec<Point>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading points file {}", path.display()))?;

    let mut points = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        points.push(parse_line(line).with_context(|| format!("{}:{}", path.display(), lineno + 1))?);
    }
    Ok(points)
}

fn parse_line(line: &str) -> Result<Point> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 || fields.len() > 4 {
        bail!("expected 3 or 4 comma-separated fields, got {}", fields.len());
    }

    let frame: i64 = fields[0].parse().context("frame must be an integer")?;
    let x: f64 = fields[1].parse().context("x must be numeric")?;
    let y: f64 = fields[2].parse().context("y must be numeric")?;

    let mut legacy = vec![LegacyField::Int(frame), LegacyField::Float(x), LegacyField::Float(y)];
    if let Some(status) = fields.get(3) {
        legacy.push(LegacyField::Status((*status).into()));
    }

    Point::from_legacy(&legacy).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_point::Status;

    #[test]
    fn parses_triples_and_quads_and_skips_comments() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "# a comment\n1,10,20\n5,30,40,endframe\n\n10,50,60,Keyframe\n",
        )
        .unwrap();

        let points = load(tmp.path()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].status, Status::Normal);
        assert_eq!(points[1].status, Status::Endframe);
        assert_eq!(points[2].status, Status::Keyframe);
    }

    #[test]
    fn rejects_malformed_line() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "1,2\n").unwrap();
        assert!(load(tmp.path()).is_err());
    }
}
