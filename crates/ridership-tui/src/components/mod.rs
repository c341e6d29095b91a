pub mod cards;
pub mod methodology;

pub use cards::InsightCards;
pub use methodology::MethodologyModal;
