//! Maps a normalized [`ListingQuery`] onto a SeaORM select over `service_listing`.

use common::catalog::{CategoryFilter, ListingQuery, SortKey};
use models::service_listing::{Column, Entity};
use sea_orm::{
    sea_query::{Expr, LikeExpr},
    ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select,
};

/// Escape character used in every `LIKE` pattern built here.
pub const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Case-insensitive substring condition on name OR description.
///
/// Matches against the lowercased copies stored at insert, so case folding is
/// Unicode-aware on every backend and agrees with [`ListingQuery::matches`].
pub fn search_condition(term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let like = |col: Column| Expr::col((Entity, col)).like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE));
    Condition::any().add(like(Column::NameSearch)).add(like(Column::DescriptionSearch))
}

pub fn build_select(query: &ListingQuery) -> Select<Entity> {
    let mut select = Entity::find();

    match &query.category {
        CategoryFilter::Any => {}
        CategoryFilter::Is(category) => select = select.filter(Column::Category.eq(*category)),
        // Compared as text so it simply matches no row.
        CategoryFilter::Unmatched(raw) => select = select.filter(Column::Category.eq(raw.clone())),
    }

    if let Some(term) = &query.search {
        select = select.filter(search_condition(term));
    }

    let select = match query.sort {
        SortKey::Newest => select.order_by_desc(Column::CreatedAt),
        SortKey::PriceAsc => select.order_by_asc(Column::Price),
        SortKey::PriceDesc => select.order_by_desc(Column::Price),
        SortKey::Rating => select.order_by_desc(Column::Rating),
    };
    select.order_by_asc(Column::Id)
}
