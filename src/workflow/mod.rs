pub mod delivery_ctx;
pub mod question_set_builder;

pub use delivery_ctx::DeliveryCtx;
pub use question_set_builder::QuestionSetBuilder;
