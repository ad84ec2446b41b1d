pub const QUESTIONS_PER_PAGE: usize = 10;

/// Fixed-size window over an ordered result set. Pages are 1-indexed;
/// out-of-range pages yield an empty slice, which the questions list
/// endpoint treats as not-found and the category/search endpoints do not.
pub fn paginate<T>(page: u32, items: &[T]) -> &[T] {
    let start = page.saturating_sub(1) as usize * QUESTIONS_PER_PAGE;
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
