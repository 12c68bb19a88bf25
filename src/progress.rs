// src/progress.rs
/// Lightweight progress reporting for the batch jobs.
/// The CLI implements this to print status lines; library callers may pass `None`.
pub trait Progress {
    /// Called once the number of candidate items is known.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One record was extracted.
    fn item_done(&mut self) {}

    /// One candidate could not be parsed; `preview` is the start of its text.
    fn item_failed(&mut self, _preview: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Use `progress` if given, else the caller's no-op sink.
/// The sink may borrow for longer than the returned handle (`'b: 'a`), so a
/// caller's long-lived reporter and a local `NullProgress` unify.
pub fn or_null<'a, 'b: 'a>(
    progress: Option<&'a mut (dyn Progress + 'b)>,
    null: &'a mut NullProgress,
) -> &'a mut (dyn Progress + 'a) {
    match progress {
        Some(p) => p,
        None => null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Lines(Vec<String>);

    impl Progress for Lines {
        fn log(&mut self, msg: &str) {
            self.0.push(msg.to_string());
        }
    }

    // Same shape as the runner entry points: the null sink is a local.
    fn job(progress: Option<&mut dyn Progress>) {
        let mut null = NullProgress;
        let progress = or_null(progress, &mut null);
        progress.log("working");
        progress.finish();
    }

    #[test]
    fn caller_sink_is_used_when_given() {
        let mut lines = Lines::default();
        job(Some(&mut lines));
        job(Some(&mut lines));
        assert_eq!(lines.0, ["working", "working"]);
    }

    #[test]
    fn none_falls_back_to_null() {
        job(None);
    }
}
