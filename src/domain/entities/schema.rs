use crate::domain::entities::record::FieldKind;
use crate::domain::entities::view::SortDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub searchable: bool,
    pub default_direction: SortDirection,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        let default_direction = match kind {
            FieldKind::Text => SortDirection::Asc,
            FieldKind::Number | FieldKind::Rank | FieldKind::Date => SortDirection::Desc,
        };
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            searchable: false,
            default_direction,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn default_direction(mut self, direction: SortDirection) -> Self {
        self.default_direction = direction;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    pub default_sort: String,
    pub rank_field: Option<String>,
    /// Order applied once after load, before ranks are assigned.
    pub initial_order: Vec<(String, SortDirection)>,
}

impl Schema {
    pub fn leaderboard() -> Self {
        Self {
            fields: vec![
                FieldSpec::new("rank", "Rank", FieldKind::Rank),
                FieldSpec::new("name", "Player", FieldKind::Text).searchable(),
                FieldSpec::new("first_name", "First Name", FieldKind::Text).searchable(),
                FieldSpec::new("last_name", "Last Name", FieldKind::Text).searchable(),
                FieldSpec::new("country", "Country", FieldKind::Text).searchable(),
                FieldSpec::new("score", "Score", FieldKind::Number),
                FieldSpec::new("level", "Level", FieldKind::Number),
                FieldSpec::new("join_date", "Joined", FieldKind::Date),
                FieldSpec::new("avatar_url", "Avatar", FieldKind::Text),
            ],
            default_sort: "score".to_string(),
            rank_field: Some("rank".to_string()),
            initial_order: vec![
                ("score".to_string(), SortDirection::Desc),
                ("level".to_string(), SortDirection::Desc),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn kind_of(&self, name: &str) -> FieldKind {
        self.field(name)
            .map(|field| field.kind)
            .unwrap_or(FieldKind::Text)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.searchable)
    }

    pub fn is_rank_field(&self, name: &str) -> bool {
        self.rank_field.as_deref() == Some(name)
    }

    pub fn default_direction_for(&self, name: &str) -> SortDirection {
        self.field(name)
            .map(|field| field.default_direction)
            .unwrap_or(SortDirection::Desc)
    }
}
