#[derive(Debug)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self { errors: vec![] }
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    /// Folds every collected error into one, so all of them are reported.
    pub(crate) fn collect(self) -> Option<syn::Error> {
        self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
    }

    pub(crate) fn into_result<T>(self, value: T) -> syn::Result<T> {
        match self.collect() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}
