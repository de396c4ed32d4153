/// Tracking direction a point sequence was produced under. Drives the
/// automatic endframe/keyframe conversions applied when the user changes
/// direction mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingDirection {
    Forward,
    Backward,
    Bidirectional,
}

impl TrackingDirection {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TrackingDirection::Forward => "fw",
            TrackingDirection::Backward => "bw",
            TrackingDirection::Bidirectional => "fwbw",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrackingDirection::Forward => "Forward",
            TrackingDirection::Backward => "Backward",
            TrackingDirection::Bidirectional => "Bidirectional",
        }
    }

    pub fn from_abbreviation(value: &str) -> Option<Self> {
        match value {
            "fw" => Some(TrackingDirection::Forward),
            "bw" => Some(TrackingDirection::Backward),
            "fwbw" => Some(TrackingDirection::Bidirectional),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_round_trips() {
        for direction in [
            TrackingDirection::Forward,
            TrackingDirection::Backward,
            TrackingDirection::Bidirectional,
        ] {
            assert_eq!(
                TrackingDirection::from_abbreviation(direction.abbreviation()),
                Some(direction)
            );
        }
    }

    #[test]
    fn unknown_abbreviation_is_none() {
        assert_eq!(TrackingDirection::from_abbreviation("sideways"), None);
    }
}
