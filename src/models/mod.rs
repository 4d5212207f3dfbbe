mod order;
mod product;
mod recommendation;
mod training;

pub use order::{Order, OrderLine, RawLineItem, RawOrder};
pub use product::{Product, RawProduct};
pub use recommendation::{RecommendationGroup, RecommendationRow};
pub use training::TrainingRow;
