//! Row iteration over an executed graph query.

use tracing::{trace, warn};

use super::GraphResult;
use crate::executor::ResultHandle;
use crate::guard::ReleaseGuard;
use crate::Result;

/// Forward-only, single-pass rows of a graph query.
///
/// Each call to [`next`](Self::next) decodes one row into a scratch
/// document and lends it out; the borrow ends before the next row is
/// decoded. The underlying handle is released when the set is dropped,
/// however iteration ended.
pub struct GraphResultSet<H: ResultHandle> {
    rows: ReleaseGuard<H, fn(&mut H)>,
    json: String,
    document: GraphResult,
    failed: bool,
}

impl<H: ResultHandle> GraphResultSet<H> {
    pub fn new(handle: H) -> Self {
        Self {
            rows: ReleaseGuard::new(handle, H::release as fn(&mut H)),
            json: String::new(),
            document: GraphResult::Null,
            failed: false,
        }
    }

    /// Row count reported by the handle; does not iterate.
    pub fn count(&self) -> usize {
        self.rows.row_count()
    }

    /// Decode the next row.
    ///
    /// Returns `None` once the rows are exhausted. A decode error is
    /// terminal: it is returned once and every later call yields `None`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Result<&GraphResult>> {
        if self.failed {
            return None;
        }

        self.json.clear();
        match self.rows.next_row(&mut self.json) {
            Ok(false) => None,
            Ok(true) => match GraphResult::parse(&self.json) {
                Ok(document) => {
                    trace!(bytes = self.json.len(), "decoded graph row");
                    self.document = document;
                    Some(Ok(&self.document))
                }
                Err(err) => {
                    warn!(error = %err, "malformed graph row; abandoning result set");
                    self.failed = true;
                    Some(Err(err))
                }
            },
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    /// Decode every remaining row into owned values.
    pub fn into_results(mut self) -> Result<Vec<GraphResult>> {
        let mut results = Vec::with_capacity(self.count());
        while let Some(row) = self.next() {
            results.push(row?.clone());
        }
        Ok(results)
    }
}

impl<H: ResultHandle + std::fmt::Debug> std::fmt::Debug for GraphResultSet<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphResultSet")
            .field("rows", &self.rows)
            .field("failed", &self.failed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::cell::Cell;

    struct Rows {
        rows: VecDeque<&'static str>,
        released: Rc<Cell<u32>>,
    }

    impl ResultHandle for Rows {
        fn row_count(&self) -> usize {
            self.rows.len()
        }

        fn next_row(&mut self, buf: &mut String) -> Result<bool> {
            match self.rows.pop_front() {
                Some(row) => {
                    buf.push_str(row);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn rows(rows: &[&'static str]) -> (Rows, Rc<Cell<u32>>) {
        let released = Rc::new(Cell::new(0));
        (Rows { rows: rows.iter().copied().collect(), released: released.clone() }, released)
    }

    #[test]
    fn test_iterates_rows_in_order() {
        let (handle, released) = rows(&["1", r#""two""#, "[3]"]);
        let mut set = GraphResultSet::new(handle);
        assert_eq!(set.count(), 3);
        assert_eq!(set.next().unwrap().unwrap().value::<i64>().unwrap(), 1);
        assert_eq!(set.next().unwrap().unwrap().value::<&str>().unwrap(), "two");
        assert_eq!(set.next().unwrap().unwrap().element_count(), 1);
        assert!(set.next().is_none());
        assert!(set.next().is_none());
        drop(set);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_decode_error_is_terminal() {
        let (handle, released) = rows(&["1", "{broken", "3"]);
        let mut set = GraphResultSet::new(handle);
        assert!(set.next().unwrap().is_ok());
        assert!(matches!(set.next(), Some(Err(crate::Error::Decode(_)))));
        assert!(set.next().is_none());
        drop(set);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_abandoned_set_releases_handle() {
        let (handle, released) = rows(&["1", "2"]);
        let mut set = GraphResultSet::new(handle);
        let _ = set.next();
        drop(set);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_into_results() {
        let (handle, _) = rows(&["true", "null"]);
        let results = GraphResultSet::new(handle).into_results().unwrap();
        assert_eq!(results, vec![GraphResult::Bool(true), GraphResult::Null]);
    }
}
