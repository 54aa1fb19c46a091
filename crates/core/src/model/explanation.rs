/// Marker the backend puts in front of feedback about the chosen (wrong) option.
pub const WRONG_MARKER: &str = "❌";
/// Marker the backend puts in front of feedback about the correct option.
pub const CORRECT_MARKER: &str = "✅";

const PART_SEPARATOR: &str = "\n\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Wrong,
    Correct,
    General,
}

impl SegmentKind {
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            SegmentKind::Wrong => "explanation-wrong",
            SegmentKind::Correct => "explanation-correct",
            SegmentKind::General => "explanation-general",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplanationSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Split answer feedback into tagged segments.
///
/// Two-part feedback (text containing both markers) is split on blank lines
/// and each part is tagged by the marker it carries. Anything else is one
/// general segment.
#[must_use]
pub fn split_explanation(explanation: &str) -> Vec<ExplanationSegment> {
    if !(explanation.contains(WRONG_MARKER) && explanation.contains(CORRECT_MARKER)) {
        return vec![ExplanationSegment {
            kind: SegmentKind::General,
            text: explanation.to_string(),
        }];
    }

    explanation
        .split(PART_SEPARATOR)
        .map(|part| {
            let kind = if part.contains(WRONG_MARKER) {
                SegmentKind::Wrong
            } else if part.contains(CORRECT_MARKER) {
                SegmentKind::Correct
            } else {
                SegmentKind::General
            };
            ExplanationSegment {
                kind,
                text: part.to_string(),
            }
        })
        .collect()
}
