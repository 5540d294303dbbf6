use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::atomic::{AtomicI64, Ordering};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

// page tokens for the in-memory stores are plain offsets into the sorted result
pub(crate) fn to_offset(page: Option<&str>) -> LibraryResult<usize> {
    match page {
        Some(token) if !token.is_empty() => token.parse::<usize>().map_err(|err| {
            LibraryError::validation(format!("invalid page token {} due to {}", token, err).as_str(),
                                     Some("400".to_string()))
        }),
        _ => Ok(0),
    }
}

pub(crate) fn paginate<T>(page: Option<&str>, page_size: usize, records: Vec<T>) -> LibraryResult<PaginatedResult<T>> {
    let offset = to_offset(page)?;
    let page_size = page_size.clamp(1, 500);
    let total = records.len();
    let records: Vec<T> = records.into_iter().skip(offset).take(page_size).collect();
    let end = offset + records.len();
    let next_page = if end < total { Some(end.to_string()) } else { None };
    Ok(PaginatedResult::new(page, page_size, next_page, records))
}

// monotonically increasing ids, never reused
#[derive(Debug)]
pub(crate) struct Sequence {
    next: AtomicI64,
}

impl Sequence {
    pub(crate) fn new() -> Self {
        Self { next: AtomicI64::new(1) }
    }

    pub(crate) fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> LibraryResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|err| LibraryError::runtime(
        format!("memory store poisoned {}", err).as_str(), None, false))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> LibraryResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|err| LibraryError::runtime(
        format!("memory store poisoned {}", err).as_str(), None, false))
}
