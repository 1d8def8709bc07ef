/// Target classes of the gesture command taxonomy, in reporting order.
///
/// `Invalid` is the reserved catch-all for raw labels the mapping table
/// does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetClass {
    Forward,
    Reverse,
    Stop,
    Left,
    Right,
    Invalid,
}

/// Mapping from raw source folder name (lower-cased) to command class
const LABEL_MAP: &[(&str, TargetClass)] = &[
    ("like", TargetClass::Forward),
    ("fist", TargetClass::Reverse),
    ("palm", TargetClass::Stop),
    ("one", TargetClass::Left),
    ("peace", TargetClass::Right),
];

impl TargetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetClass::Forward => "Forward",
            TargetClass::Reverse => "Reverse",
            TargetClass::Stop => "Stop",
            TargetClass::Left => "Left",
            TargetClass::Right => "Right",
            TargetClass::Invalid => "Invalid",
        }
    }

    pub fn all() -> [TargetClass; 6] {
        [
            TargetClass::Forward,
            TargetClass::Reverse,
            TargetClass::Stop,
            TargetClass::Left,
            TargetClass::Right,
            TargetClass::Invalid,
        ]
    }

    /// Map a raw source label to its command class. Total: unknown labels
    /// land in `Invalid`.
    pub fn from_raw_label(raw: &str) -> TargetClass {
        let lowered = raw.to_lowercase();
        LABEL_MAP
            .iter()
            .find(|(label, _)| *label == lowered)
            .map(|(_, class)| *class)
            .unwrap_or(TargetClass::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_commands() {
        assert_eq!(TargetClass::from_raw_label("like"), TargetClass::Forward);
        assert_eq!(TargetClass::from_raw_label("fist"), TargetClass::Reverse);
        assert_eq!(TargetClass::from_raw_label("palm"), TargetClass::Stop);
        assert_eq!(TargetClass::from_raw_label("one"), TargetClass::Left);
        assert_eq!(TargetClass::from_raw_label("peace"), TargetClass::Right);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(TargetClass::from_raw_label("LIKE"), TargetClass::Forward);
        assert_eq!(TargetClass::from_raw_label("Fist"), TargetClass::Reverse);
    }

    #[test]
    fn test_unknown_labels_fall_back_to_invalid() {
        assert_eq!(
            TargetClass::from_raw_label("unknown_gesture"),
            TargetClass::Invalid
        );
        assert_eq!(TargetClass::from_raw_label(""), TargetClass::Invalid);
    }

    #[test]
    fn test_reporting_order_is_stable() {
        let names: Vec<&str> = TargetClass::all().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["Forward", "Reverse", "Stop", "Left", "Right", "Invalid"]
        );
    }
}
