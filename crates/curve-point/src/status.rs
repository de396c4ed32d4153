/// A point's status tag. Exactly five variants, mirroring 3DEqualizer's
/// point-status vocabulary (`core/models.py::PointStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Normal,
    Interpolated,
    Keyframe,
    Tracked,
    Endframe,
}

/// Any of the three legacy encodings a `status` field may arrive in.
///
/// Source data mixes these freely: newer exports use the text form, older
/// ones the integer form, and at least one pipeline just tracks an
/// "is this interpolated" boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyStatus {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for LegacyStatus {
    fn from(value: &str) -> Self {
        LegacyStatus::Text(value.to_string())
    }
}

impl From<i64> for LegacyStatus {
    fn from(value: i64) -> Self {
        LegacyStatus::Int(value)
    }
}

impl From<bool> for LegacyStatus {
    fn from(value: bool) -> Self {
        LegacyStatus::Bool(value)
    }
}

impl Status {
    /// Order matches the integer legacy encoding: 0=Normal, 1=Interpolated,
    /// 2=Keyframe, 3=Tracked, 4=Endframe.
    const ORDER: [Status; 5] = [
        Status::Normal,
        Status::Interpolated,
        Status::Keyframe,
        Status::Tracked,
        Status::Endframe,
    ];

    /// Decodes any of the three legacy forms. Unrecognized text or
    /// out-of-range integers degrade to `Normal` rather than erroring —
    /// query operations never fail, and a status tag is not load-bearing
    /// enough to justify rejecting an otherwise valid point.
    pub fn from_legacy(value: impl Into<LegacyStatus>) -> Self {
        match value.into() {
            LegacyStatus::Text(text) => match text.to_ascii_lowercase().as_str() {
                "normal" => Status::Normal,
                "interpolated" => Status::Interpolated,
                "keyframe" => Status::Keyframe,
                "tracked" => Status::Tracked,
                "endframe" => Status::Endframe,
                _ => Status::Normal,
            },
            LegacyStatus::Int(n) => usize::try_from(n)
                .ok()
                .and_then(|i| Self::ORDER.get(i).copied())
                .unwrap_or(Status::Normal),
            LegacyStatus::Bool(flag) => {
                if flag {
                    Status::Interpolated
                } else {
                    Status::Normal
                }
            }
        }
    }

    /// Canonical lowercase text form, used by `to_legacy` and by the status
    /// column of any serialized curve.
    pub fn to_legacy_string(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Interpolated => "interpolated",
            Status::Keyframe => "keyframe",
            Status::Tracked => "tracked",
            Status::Endframe => "endframe",
        }
    }

    /// True iff `Interpolated` — the boolean legacy form only ever
    /// distinguished interpolated points from everything else.
    pub fn to_legacy_bool(&self) -> bool {
        matches!(self, Status::Interpolated)
    }

    /// `Keyframe`, `Tracked`, or `Normal` — eligible as an interpolation
    /// boundary and as a segment-reopening startframe candidate.
    pub fn is_keyframe_like(&self) -> bool {
        matches!(self, Status::Keyframe | Status::Tracked | Status::Normal)
    }

    /// `Endframe` — closes the active run it terminates.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Status::Endframe)
    }
}
