/// Progress events emitted by long-running synthesis runs.
///
/// Stages are the coarse phases of a workflow (component generation, pool
/// filtering, blend mixing); item events track row production within a stage.
#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { name: &'static str },
    StageFinish,

    ItemsStart { total: u64 },
    ItemsAdvance { count: u64 },
    ItemsFinish,

    Note(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional caller-supplied callback; a
/// reporter without a callback is a no-op sink.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
