pub mod distractor_sampler;
pub mod option_formatter;
pub mod question_generator;

pub use distractor_sampler::DistractorSampler;
pub use option_formatter::OptionFormatter;
pub use question_generator::QuestionGenerator;
