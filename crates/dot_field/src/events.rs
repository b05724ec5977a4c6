//! Event types and sinks for observing pipeline stages.
//!
//! Stage runners in [`crate::pipeline`] emit [`FieldEvent`]s to an [`EventSink`]
//! while relaxing dots and stippling a raster.
use crate::relax::RelaxationSummary;
use crate::stipple::Mark;

/// Describes events emitted by the pipeline.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum FieldEvent {
    /// Emitted before the first relaxation pass.
    RelaxationStarted {
        /// Number of dots being relaxed.
        dot_count: usize,
        /// Number of passes that will run.
        iterations: usize,
        /// Ideal spacing for this population.
        ideal_spacing: f64,
    },

    /// Emitted after the last relaxation pass.
    RelaxationFinished { summary: RelaxationSummary },

    /// Emitted when the Poisson-disk sampler returns.
    SamplingFinished {
        /// Accepted points.
        points: usize,
        /// Candidates generated.
        attempts: usize,
        /// Acceptances that displaced an earlier grid occupant.
        overwritten_cells: usize,
    },

    /// Emitted for every mark the stipple filter produces.
    MarkEmitted { mark: Mark },

    /// Emitted when the stipple filter finishes.
    StippleFinished {
        considered: usize,
        out_of_bounds: usize,
        emitted: usize,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. stage name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`FieldEvent`] used to skip building events nobody wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldEventKind {
    RelaxationStarted,
    RelaxationFinished,
    SamplingFinished,
    MarkEmitted,
    StippleFinished,
    Warning,
}

impl FieldEvent {
    pub fn kind(&self) -> FieldEventKind {
        match self {
            FieldEvent::RelaxationStarted { .. } => FieldEventKind::RelaxationStarted,
            FieldEvent::RelaxationFinished { .. } => FieldEventKind::RelaxationFinished,
            FieldEvent::SamplingFinished { .. } => FieldEventKind::SamplingFinished,
            FieldEvent::MarkEmitted { .. } => FieldEventKind::MarkEmitted,
            FieldEvent::StippleFinished { .. } => FieldEventKind::StippleFinished,
            FieldEvent::Warning { .. } => FieldEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`FieldEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: FieldEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: FieldEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: FieldEvent) {}

    #[inline]
    fn wants(&self, _kind: FieldEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(FieldEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(FieldEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(FieldEvent),
{
    #[inline]
    fn send(&mut self, event: FieldEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally skipping per-mark events.
#[derive(Default)]
pub struct VecSink {
    events: Vec<FieldEvent>,
    skip_marks: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that ignores [`FieldEvent::MarkEmitted`].
    pub fn without_marks() -> Self {
        Self {
            events: Vec::new(),
            skip_marks: true,
        }
    }

    pub fn into_inner(self) -> Vec<FieldEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[FieldEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: FieldEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: FieldEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: FieldEventKind) -> bool {
        !(self.skip_marks && kind == FieldEventKind::MarkEmitted)
    }
}
