use std::ops::Range;

use crate::domain::controllers::ValidationError;
use crate::domain::entities::view::ViewState;

/// At least one page, even for an empty result.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

pub fn set_page_size(state: &mut ViewState, page_size: usize) -> Result<(), ValidationError> {
    if page_size == 0 {
        return Err(ValidationError::PageSizeZero);
    }
    state.page_size = page_size;
    state.page_index = 0;
    Ok(())
}

pub fn go_to(
    state: &mut ViewState,
    target: usize,
    total_pages: usize,
) -> Result<(), ValidationError> {
    if target >= total_pages {
        return Err(ValidationError::PageOutOfRange {
            target,
            total_pages,
        });
    }
    state.page_index = target;
    Ok(())
}

/// Pulls the page index back inside the current bounds after the result shrank.
pub fn clamp(state: &mut ViewState, filtered_count: usize) {
    let pages = total_pages(filtered_count, state.page_size);
    if state.page_index >= pages {
        state.page_index = pages - 1;
    }
}

pub fn window(page_index: usize, page_size: usize, count: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_a_floor_of_one() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(30, 25), 2);
        assert_eq!(total_pages(101, 10), 11);
    }

    #[test]
    fn go_to_out_of_range_is_a_no_op() {
        let mut state = ViewState::default();
        let pages = total_pages(30, state.page_size);

        go_to(&mut state, 1, pages).expect("page 1 exists");
        assert!(go_to(&mut state, pages, pages).is_err());
        assert!(go_to(&mut state, pages + 1, pages).is_err());
        assert_eq!(state.page_index, 1);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut state = ViewState {
            page_index: 1,
            ..ViewState::default()
        };
        assert_eq!(
            set_page_size(&mut state, 0),
            Err(ValidationError::PageSizeZero)
        );
        assert_eq!(state.page_size, 25);
        assert_eq!(state.page_index, 1);

        set_page_size(&mut state, 10).expect("valid size");
        assert_eq!(state.page_size, 10);
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn clamp_keeps_index_inside_shrunken_result() {
        let mut state = ViewState {
            page_size: 10,
            page_index: 4,
            ..ViewState::default()
        };
        clamp(&mut state, 21);
        assert_eq!(state.page_index, 2);

        clamp(&mut state, 0);
        assert_eq!(state.page_index, 0);
    }

    #[test]
    fn window_is_bounded_by_count() {
        assert_eq!(window(1, 25, 30), 25..30);
        assert_eq!(window(0, 25, 0), 0..0);
        assert_eq!(window(5, 25, 30), 30..30);
    }
}
