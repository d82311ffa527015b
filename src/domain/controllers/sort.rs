use std::cmp::Ordering;

use crate::domain::controllers::ValidationError;
use crate::domain::entities::record::Record;
use crate::domain::entities::schema::Schema;
use crate::domain::entities::view::{SortDirection, ViewState};

/// Re-selecting the active field flips its direction; any other field is
/// activated with its own default direction. Either way the view returns to
/// the first page.
pub fn toggle_sort(
    state: &mut ViewState,
    schema: &Schema,
    field: &str,
) -> Result<(), ValidationError> {
    let Some(spec) = schema.field(field) else {
        return Err(ValidationError::UnknownField(field.to_string()));
    };

    if state.sort_field.as_deref() == Some(field) {
        state.sort_direction = state.sort_direction.flipped();
    } else {
        state.sort_field = Some(spec.name.clone());
        state.sort_direction = spec.default_direction;
    }
    state.page_index = 0;
    Ok(())
}

/// Compares two records on `field`. Equal keys fall back to load order in
/// both directions so every ordering is reproducible.
pub fn compare_records(
    left: (usize, &Record),
    right: (usize, &Record),
    field: &str,
    direction: SortDirection,
) -> Ordering {
    let primary = left.1.get(field).compare(right.1.get(field));
    let primary = match direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary.then_with(|| left.0.cmp(&right.0))
}

/// Orders load indices in place. Without a sort field, load order is kept.
pub fn sort_indices(
    records: &[Record],
    indices: &mut [usize],
    field: Option<&str>,
    direction: SortDirection,
) {
    match field {
        Some(field) => indices.sort_by(|&a, &b| {
            compare_records((a, &records[a]), (b, &records[b]), field, direction)
        }),
        None => indices.sort_unstable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::record::Value;

    fn scored(name: &str, score: f64) -> Record {
        Record::new()
            .with("name", Value::Text(name.to_string()))
            .with("score", Value::Number(score))
    }

    #[test]
    fn toggle_same_field_flips_direction() {
        let schema = Schema::leaderboard();
        let mut state = ViewState::default();
        assert_eq!(state.sort_field.as_deref(), Some("score"));

        toggle_sort(&mut state, &schema, "score").expect("known field");
        assert_eq!(state.sort_direction, SortDirection::Asc);

        toggle_sort(&mut state, &schema, "score").expect("known field");
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn new_field_uses_its_default_direction() {
        let schema = Schema::leaderboard();
        let mut state = ViewState {
            page_index: 2,
            ..ViewState::default()
        };

        toggle_sort(&mut state, &schema, "name").expect("known field");
        assert_eq!(state.sort_field.as_deref(), Some("name"));
        assert_eq!(state.sort_direction, SortDirection::Asc);
        assert_eq!(state.page_index, 0);

        toggle_sort(&mut state, &schema, "level").expect("known field");
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn unknown_field_is_rejected_without_changes() {
        let schema = Schema::leaderboard();
        let mut state = ViewState::default();
        let before = state.clone();

        let err = toggle_sort(&mut state, &schema, "nope").expect_err("unknown field");
        assert_eq!(err, ValidationError::UnknownField("nope".to_string()));
        assert_eq!(state, before);
    }

    #[test]
    fn ties_keep_load_order_in_both_directions() {
        let records = vec![scored("a", 50.0), scored("b", 80.0), scored("c", 80.0)];
        let mut indices = vec![0, 1, 2];

        sort_indices(&records, &mut indices, Some("score"), SortDirection::Desc);
        assert_eq!(indices, vec![1, 2, 0]);

        sort_indices(&records, &mut indices, Some("score"), SortDirection::Asc);
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn case_variants_tie_and_keep_load_order() {
        let records = vec![scored("bob", 1.0), scored("Bob", 2.0)];
        let mut indices = vec![0, 1];

        sort_indices(&records, &mut indices, Some("name"), SortDirection::Asc);
        assert_eq!(indices, vec![0, 1]);

        sort_indices(&records, &mut indices, Some("name"), SortDirection::Desc);
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn rank_defaults_to_descending_like_other_numbers() {
        let schema = Schema::leaderboard();
        let mut state = ViewState::default();

        toggle_sort(&mut state, &schema, "rank").expect("known field");
        assert_eq!(state.sort_field.as_deref(), Some("rank"));
        assert_eq!(state.sort_direction, SortDirection::Desc);

        toggle_sort(&mut state, &schema, "join_date").expect("known field");
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn text_sort_ignores_case() {
        let records = vec![scored("bravo", 1.0), scored("Alpha", 2.0), scored("charlie", 3.0)];
        let mut indices = vec![0, 1, 2];

        sort_indices(&records, &mut indices, Some("name"), SortDirection::Asc);
        assert_eq!(indices, vec![1, 0, 2]);
    }
}
