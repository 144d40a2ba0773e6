/// Ordered fallback chains.
///
/// A `Cascade` holds labelled strategies and runs them in insertion order,
/// stopping at the first one that yields a value. Date-format parsing and
/// document source lookup are both expressed as cascades.
pub struct Cascade<'a, I: ?Sized, T> {
    steps: Vec<Step<'a, I, T>>,
}

struct Step<'a, I: ?Sized, T> {
    label: &'static str,
    attempt: Box<dyn Fn(&I) -> Option<T> + Send + Sync + 'a>,
}

/// The value produced by a cascade and the label of the step that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit<T> {
    pub label: &'static str,
    pub value: T,
}

impl<'a, I: ?Sized, T> Cascade<'a, I, T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a strategy; it runs after every strategy already added.
    pub fn then<F>(mut self, label: &'static str, attempt: F) -> Self
    where
        F: Fn(&I) -> Option<T> + Send + Sync + 'a,
    {
        self.steps.push(Step {
            label,
            attempt: Box::new(attempt),
        });
        self
    }

    pub fn run(&self, input: &I) -> Option<Hit<T>> {
        self.steps.iter().find_map(|step| {
            (step.attempt)(input).map(|value| Hit {
                label: step.label,
                value,
            })
        })
    }
}

impl<'a, I: ?Sized, T> Default for Cascade<'a, I, T> {
    fn default() -> Self {
        Self::new()
    }
}
