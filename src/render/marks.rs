use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    /// Name label at the start of a series line.
    Line,
    /// Name label at the end of an average-series path.
    Average,
    Low,
    High,
    OwnArea,
    Testimonial,
}

/// A circle mark for one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotMark {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
    pub opacity: f64,
    /// Own-area / extreme dots draw in the emphasis colour and above others.
    pub emphasized: bool,
}

/// A polyline mark; gaps from not-published values split it into segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMark {
    pub key: String,
    pub segments: Vec<Vec<(f64, f64)>>,
    pub color: String,
    pub dashed: bool,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMark {
    pub key: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub align: LabelAlign,
    pub kind: LabelKind,
    pub color: Option<String>,
}

/// Tagged union over the chart's mark families; the join is keyed across
/// all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    Dot(DotMark),
    Path(PathMark),
    Label(LabelMark),
}

impl Mark {
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Mark::Dot(dot) => &dot.key,
            Mark::Path(path) => &path.key,
            Mark::Label(label) => &label.key,
        }
    }

    pub fn validate(&self) -> StoryResult<()> {
        match self {
            Mark::Dot(dot) => {
                for (value, name) in [(dot.x, "x"), (dot.y, "y")] {
                    if !value.is_finite() {
                        return Err(StoryError::InvalidData(format!(
                            "dot `{}` has non-finite {name}",
                            dot.key
                        )));
                    }
                }
                if !dot.radius.is_finite() || dot.radius <= 0.0 {
                    return Err(StoryError::InvalidData(format!(
                        "dot `{}` radius must be finite and > 0",
                        dot.key
                    )));
                }
                validate_opacity(&dot.key, dot.opacity)
            }
            Mark::Path(path) => {
                for segment in &path.segments {
                    for (x, y) in segment {
                        if !x.is_finite() || !y.is_finite() {
                            return Err(StoryError::InvalidData(format!(
                                "path `{}` has non-finite point",
                                path.key
                            )));
                        }
                    }
                }
                validate_opacity(&path.key, path.opacity)
            }
            Mark::Label(label) => {
                if !label.x.is_finite() || !label.y.is_finite() {
                    return Err(StoryError::InvalidData(format!(
                        "label `{}` has non-finite position",
                        label.key
                    )));
                }
                Ok(())
            }
        }
    }
}

fn validate_opacity(key: &str, opacity: f64) -> StoryResult<()> {
    if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
        return Err(StoryError::InvalidData(format!(
            "mark `{key}` opacity must be finite and in [0, 1]"
        )));
    }
    Ok(())
}
