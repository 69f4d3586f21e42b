use crate::{
    executor::ExecuteError,
    store::{NativeRow, NativeRows, Record},
};
use std::{cell::Cell, rc::Rc};

///
/// Liveness
///
/// Shared open/closed flag tying result streams to the owning session.
/// Cloned into every stream the session hands out; flipped once when
/// the session is released.
///

#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    #[must_use]
    pub fn open() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn close(&self) {
        self.0.set(false);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.0.get()
    }
}

///
/// RecordStream
///
/// Lazy, forward-only, single-pass sequence of result records. Each
/// element wraps one native row in the name/value envelope at the
/// moment it is consumed. Consuming a stream after its owning session
/// is released fails fast with `SessionClosed`; the stream is fused
/// after the first failure.
///

#[derive(Debug)]
pub struct RecordStream {
    entity: String,
    rows: std::vec::IntoIter<NativeRow>,
    liveness: Liveness,
    failed: bool,
}

impl RecordStream {
    pub(crate) fn new(rows: NativeRows, liveness: Liveness) -> Self {
        Self {
            entity: rows.entity,
            rows: rows.rows.into_iter(),
            liveness,
            failed: false,
        }
    }

    /// Logical entity name the records belong to.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl Iterator for RecordStream {
    type Item = Result<Record, ExecuteError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if !self.liveness.is_open() {
            self.failed = true;
            return Some(Err(ExecuteError::SessionClosed));
        }

        self.rows
            .next()
            .map(|row| Ok(Record::from_native(self.entity.clone(), row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> NativeRows {
        NativeRows {
            entity: "Person".to_string(),
            rows: vec![
                NativeRow::new().with("id", 1u64),
                NativeRow::new().with("id", 2u64),
            ],
        }
    }

    #[test]
    fn stream_is_single_pass() {
        let mut stream = RecordStream::new(rows(), Liveness::open());

        let first = stream.next().expect("first record").expect("ok");
        assert_eq!(first.entity(), "Person");
        assert!(stream.next().is_some());
        assert!(stream.next().is_none(), "exhausted stream stays exhausted");
    }

    #[test]
    fn closed_session_fails_fast_and_fuses() {
        let liveness = Liveness::open();
        let mut stream = RecordStream::new(rows(), liveness.clone());

        assert!(stream.next().expect("live stream yields").is_ok());

        liveness.close();
        let failure = stream.next().expect("failure is surfaced");
        assert!(matches!(failure, Err(ExecuteError::SessionClosed)));
        assert!(stream.next().is_none(), "stream is fused after failing");
    }
}
