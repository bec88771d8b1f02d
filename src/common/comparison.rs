/// Records to add to and remove from the provider when the desired set
/// replaces the current one.
pub(crate) struct DiffResult<R> {
    pub create: Vec<R>,
    pub delete: Vec<R>,
}

impl<R> DiffResult<R> {
    pub fn len(&self) -> usize {
        self.create.len() + self.delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compares two record sets as unordered collections. Duplicates are
/// matched one to one.
pub(crate) fn diff_records<R: Clone + PartialEq>(current: &[R], desired: &[R]) -> DiffResult<R> {
    let mut unmatched: Vec<&R> = current.iter().collect();
    let mut create: Vec<R> = Vec::with_capacity(desired.len());

    for record in desired {
        match unmatched.iter().position(|existing| *existing == record) {
            Some(index) => {
                unmatched.swap_remove(index);
            }
            None => create.push(record.clone()),
        }
    }

    // Keep the provider's listing order for removals
    let delete = current
        .iter()
        .filter(|record| unmatched.iter().any(|r| std::ptr::eq(*r, *record)))
        .cloned()
        .collect();

    DiffResult { create, delete }
}
