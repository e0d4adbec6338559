use serde::{Deserialize, Serialize};

use crate::model::Size;

/// Constraint handed down by the host for one axis during a measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeasureSpec {
    Exactly(f32),
    AtMost(f32),
    Unspecified,
}

pub fn resolve_size(desired: f32, spec: MeasureSpec) -> f32 {
    match spec {
        MeasureSpec::Exactly(size) => size,
        MeasureSpec::AtMost(size) => desired.min(size),
        MeasureSpec::Unspecified => desired,
    }
}

/// Resolves both axes independently against their constraints.
pub fn measure(desired: Size, width: MeasureSpec, height: MeasureSpec) -> Size {
    Size {
        width: resolve_size(desired.width, width),
        height: resolve_size(desired.height, height),
    }
}
