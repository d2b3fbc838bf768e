//! Directive evaluation: comment text in, graph mutations out.

mod context;
mod engine;
mod registry;
mod token;

pub use context::{DirectiveContext, is_relative_specifier, module_name_for};
pub use engine::{DirectiveEngine, Evaluation};
pub use registry::{AnchorEvaluator, DirectiveEvaluator, DirectiveRegistry};
pub use token::{DirectivePattern, DirectiveToken, tokenize};
