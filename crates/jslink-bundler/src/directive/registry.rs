//! Directive registry.
//!
//! A registry holds exactly one anchor directive and an ordered list of
//! satellites. The anchor declares the module a comment block belongs to;
//! satellites run afterwards against that module and only when the anchor
//! matched in the same block.

use std::fmt;

use jslink_graph::{Error, ModuleId, Result};

use super::context::{DirectiveContext, is_relative_specifier};
use super::token::DirectivePattern;

/// Evaluates the anchor token and returns the module it declares.
pub trait AnchorEvaluator: Send + Sync {
    fn evaluate(&self, ctx: &mut DirectiveContext<'_>, token: &str) -> Result<ModuleId>;
}

impl<F> AnchorEvaluator for F
where
    F: Fn(&mut DirectiveContext<'_>, &str) -> Result<ModuleId> + Send + Sync,
{
    fn evaluate(&self, ctx: &mut DirectiveContext<'_>, token: &str) -> Result<ModuleId> {
        self(ctx, token)
    }
}

/// Evaluates one satellite token against the block's anchor module.
pub trait DirectiveEvaluator: Send + Sync {
    fn evaluate(&self, ctx: &mut DirectiveContext<'_>, module: ModuleId, token: &str)
    -> Result<()>;
}

impl<F> DirectiveEvaluator for F
where
    F: Fn(&mut DirectiveContext<'_>, ModuleId, &str) -> Result<()> + Send + Sync,
{
    fn evaluate(
        &self,
        ctx: &mut DirectiveContext<'_>,
        module: ModuleId,
        token: &str,
    ) -> Result<()> {
        self(ctx, module, token)
    }
}

pub(crate) struct Anchor {
    pub(crate) name: String,
    pub(crate) pattern: DirectivePattern,
    pub(crate) evaluator: Box<dyn AnchorEvaluator>,
}

pub(crate) struct Satellite {
    pub(crate) name: String,
    pub(crate) pattern: DirectivePattern,
    pub(crate) evaluator: Box<dyn DirectiveEvaluator>,
}

/// Ordered set of named directive evaluators.
pub struct DirectiveRegistry {
    pub(crate) anchor: Anchor,
    pub(crate) satellites: Vec<Satellite>,
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("anchor", &self.anchor.name)
            .field("satellites", &self.satellite_names())
            .finish()
    }
}

impl DirectiveRegistry {
    /// Create a registry around its anchor directive.
    pub fn new(
        name: impl Into<String>,
        pattern: DirectivePattern,
        evaluator: impl AnchorEvaluator + 'static,
    ) -> Self {
        Self {
            anchor: Anchor {
                name: name.into(),
                pattern,
                evaluator: Box::new(evaluator),
            },
            satellites: Vec::new(),
        }
    }

    /// The `module` / `requires` / `export` set.
    pub fn standard() -> Self {
        let mut registry = Self::new("module", DirectivePattern::new("module"), define_module);
        registry.satellites.push(Satellite {
            name: "requires".to_string(),
            pattern: DirectivePattern::new("requires"),
            evaluator: Box::new(require_module),
        });
        registry.satellites.push(Satellite {
            name: "export".to_string(),
            pattern: DirectivePattern::new("export"),
            evaluator: Box::new(export_module),
        });
        registry
    }

    /// Add a satellite directive. Satellites run in registration order.
    ///
    /// The name must be unique, and the pattern must not accept the anchor's tag.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        pattern: DirectivePattern,
        evaluator: impl DirectiveEvaluator + 'static,
    ) -> Result<&mut Self> {
        let name = name.into();
        if name == self.anchor.name || pattern.overlaps(&self.anchor.pattern) {
            return Err(Error::InvalidDirective {
                name,
                reason: format!("conflicts with anchor directive `{}`", self.anchor.name),
            });
        }
        if self.satellites.iter().any(|s| s.name == name) {
            return Err(Error::InvalidDirective {
                name,
                reason: "already registered".to_string(),
            });
        }

        self.satellites.push(Satellite {
            name,
            pattern,
            evaluator: Box::new(evaluator),
        });
        Ok(self)
    }

    /// Reorder satellites. Listed names run first, in the given order; the
    /// rest keep their registration order after them.
    pub fn set_order<S: AsRef<str>>(&mut self, order: &[S]) -> Result<()> {
        for name in order {
            let name = name.as_ref();
            if !self.satellites.iter().any(|s| s.name == name) {
                return Err(Error::InvalidDirective {
                    name: name.to_string(),
                    reason: "cannot order an unregistered satellite".to_string(),
                });
            }
        }

        let rank = |name: &str| {
            order
                .iter()
                .position(|n| n.as_ref() == name)
                .unwrap_or(order.len())
        };
        self.satellites.sort_by_key(|s| rank(&s.name));
        Ok(())
    }

    pub fn anchor_name(&self) -> &str {
        &self.anchor.name
    }

    pub fn satellite_names(&self) -> Vec<&str> {
        self.satellites.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.satellites.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn define_module(ctx: &mut DirectiveContext<'_>, token: &str) -> Result<ModuleId> {
    ctx.graph.define_module(token, ctx.source)
}

fn require_module(ctx: &mut DirectiveContext<'_>, module: ModuleId, token: &str) -> Result<()> {
    let required = if is_relative_specifier(token) {
        ctx.discover(token)?
    } else {
        ctx.graph.get_or_insert(token)?
    };
    ctx.graph.connect_ids(module, required)
}

fn export_module(ctx: &mut DirectiveContext<'_>, module: ModuleId, token: &str) -> Result<()> {
    ctx.graph.mark_export(module, token)?;
    Ok(())
}
