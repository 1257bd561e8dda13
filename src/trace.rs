//! Sweep tracing behind the `tracing` feature.
//!
//! A match call opens one info span. Its outcome (orientation failure,
//! acceptance or rejection) is an info event, and each scale step is a debug
//! event carrying `scale_pct`. Without the feature every macro expands to
//! nothing beyond evaluating its field values.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Info event for the outcome of a match call.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::event!(name: $name, tracing::Level::INFO, {})
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Debug event for one step of the scale sweep.
#[cfg(feature = "tracing")]
macro_rules! trace_scale {
    ($name:expr, $scale_pct:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::debug!(name: $name, scale_pct = $scale_pct $(, $key = $value)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_scale {
    ($name:expr, $scale_pct:expr $(, $key:ident = $value:expr)* $(,)?) => {
        let _ = ($scale_pct, $($value,)*);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_scale;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
