//! Query composition for the public animal listing.

use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::entities::animal::{self, SizeCategory, Species};

pub const PAGE_SIZE: usize = 6;

/// Raw query-string parameters; every field is optional and free-form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListingParams {
    pub species: Option<String>,
    pub size: Option<String>,
    pub sort_by: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Age,
    ChildFriendly,
}

impl SortKey {
    /// Anything outside the allow-list falls back to name ordering.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("age") => Self::Age,
            Some("child_friendly") => Self::ChildFriendly,
            _ => Self::Name,
        }
    }

    fn column(self) -> animal::Column {
        match self {
            Self::Name => animal::Column::Name,
            Self::Age => animal::Column::Age,
            Self::ChildFriendly => animal::Column::ChildFriendly,
        }
    }
}

/// Normalised listing request. Unknown or blank filters are dropped here so
/// the query builder only ever sees meaningful constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingQuery {
    pub species: Option<Species>,
    pub size: Option<SizeCategory>,
    pub search: Option<String>,
    pub sort_by: SortKey,
    pub page: usize,
}

impl From<&ListingParams> for ListingQuery {
    fn from(params: &ListingParams) -> Self {
        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(1);

        Self {
            species: params.species.as_deref().and_then(Species::from_param),
            size: params.size.as_deref().and_then(SizeCategory::from_param),
            search,
            sort_by: SortKey::from_param(params.sort_by.as_deref()),
            page,
        }
    }
}

impl ListingQuery {
    /// Available animals matching every filter, ordered by the sort key with
    /// the id as tiebreaker.
    pub fn select(&self) -> Select<animal::Entity> {
        let mut query = animal::Entity::find().filter(animal::Column::IsAvailable.eq(true));

        if let Some(species) = self.species {
            query = query.filter(animal::Column::Species.eq(species));
        }
        if let Some(size) = self.size {
            query = query.filter(animal::Column::SizeCategory.eq(size));
        }
        if let Some(term) = &self.search {
            // LOWER() on both sides: one case mapping for term and columns.
            let pattern = format!("%{}%", escape_like(term));
            query = query.filter(
                Condition::any()
                    .add(lower(animal::Column::Name).binary(BinOper::Like, lowered(&pattern)))
                    .add(lower(animal::Column::Breed).binary(BinOper::Like, lowered(&pattern))),
            );
        }

        query
            .order_by_asc(self.sort_by.column())
            .order_by_asc(animal::Column::Id)
    }
}

fn lower(column: animal::Column) -> Expr {
    Expr::expr(Func::lower(Expr::col((animal::Entity, column))))
}

fn lowered(pattern: &str) -> SimpleExpr {
    Func::lower(Expr::val(pattern)).into()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: usize,
    pub num_pages: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Cuts one page out of `items`. An empty first page is valid; any other
/// page outside `1..=num_pages` is `None`.
pub fn paginate<T>(items: Vec<T>, page: usize) -> Option<(Vec<T>, PageInfo)> {
    let total = items.len();
    let num_pages = total.div_ceil(PAGE_SIZE).max(1);
    if page == 0 || page > num_pages {
        return None;
    }

    let slice = items
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Some((
        slice,
        PageInfo {
            number: page,
            num_pages,
            total,
            has_next: page < num_pages,
            has_previous: page > 1,
        },
    ))
}
