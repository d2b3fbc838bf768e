//! Drives anchor and satellite evaluation over a source unit's comment blocks.

use std::path::Path;

use jslink_graph::{CommentScanner, Error, ModuleGraph, ModuleId, Result, SourceId};

use super::context::DirectiveContext;
use super::registry::DirectiveRegistry;
use super::token::{DirectiveToken, tokenize};
use crate::runtime::Runtime;

/// Counts from evaluating one source unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Comment blocks that declared a module.
    pub blocks: usize,
    /// Satellite directives applied.
    pub directives: usize,
}

/// Applies a [`DirectiveRegistry`] to source units.
pub struct DirectiveEngine<'a> {
    registry: &'a DirectiveRegistry,
    scanner: &'a dyn CommentScanner,
    runtime: &'a dyn Runtime,
    root: &'a Path,
}

impl<'a> DirectiveEngine<'a> {
    pub fn new(
        registry: &'a DirectiveRegistry,
        scanner: &'a dyn CommentScanner,
        runtime: &'a dyn Runtime,
        root: &'a Path,
    ) -> Self {
        Self {
            registry,
            scanner,
            runtime,
            root,
        }
    }

    /// Evaluate the directives of `source` once.
    ///
    /// A unit that was already evaluated is left alone and reports zero
    /// counts. Errors carry the unit's path.
    pub fn evaluate(&self, graph: &mut ModuleGraph, source: SourceId) -> Result<Evaluation> {
        if !graph.mark_evaluated(source) {
            return Ok(Evaluation::default());
        }

        let unit = graph.source(source);
        let path = unit.path().to_path_buf();
        let blocks: Vec<Vec<DirectiveToken>> = unit
            .comments(self.scanner)
            .iter()
            .filter(|block| block.qualifies())
            .map(|block| tokenize(&block.text))
            .collect();

        let mut ctx = DirectiveContext {
            graph,
            source,
            path: &path,
            runtime: self.runtime,
            root: self.root,
        };

        let mut evaluation = Evaluation::default();
        for tokens in &blocks {
            let Some(module) = self.evaluate_anchor(&mut ctx, tokens)? else {
                continue;
            };
            evaluation.blocks += 1;
            evaluation.directives += self.evaluate_satellites(&mut ctx, module, tokens)?;
        }
        Ok(evaluation)
    }

    fn evaluate_anchor(
        &self,
        ctx: &mut DirectiveContext<'_>,
        tokens: &[DirectiveToken],
    ) -> Result<Option<ModuleId>> {
        let anchor = &self.registry.anchor;
        let mut matches = tokens
            .iter()
            .filter(|t| anchor.pattern.matches(&t.tag) && !t.value.is_empty());

        let Some(first) = matches.next() else {
            return Ok(None);
        };
        if let Some(second) = matches.next() {
            return Err(Error::DuplicateDefinition {
                module: second.value.clone(),
                file: Some(ctx.path.to_path_buf()),
                previous: None,
            });
        }

        let module = anchor
            .evaluator
            .evaluate(ctx, &first.value)
            .map_err(|e| e.in_file(ctx.path))?;
        tracing::debug!(
            module = %first.value,
            path = %ctx.path.display(),
            "evaluated {} directive",
            anchor.name
        );
        Ok(Some(module))
    }

    fn evaluate_satellites(
        &self,
        ctx: &mut DirectiveContext<'_>,
        module: ModuleId,
        tokens: &[DirectiveToken],
    ) -> Result<usize> {
        let mut applied = 0;
        for satellite in &self.registry.satellites {
            for token in tokens {
                if token.value.is_empty() || !satellite.pattern.matches(&token.tag) {
                    continue;
                }
                satellite
                    .evaluator
                    .evaluate(ctx, module, &token.value)
                    .map_err(|e| e.in_file(ctx.path))?;
                tracing::debug!(
                    module = %ctx.graph.name(module),
                    value = %token.value,
                    "evaluated {} directive",
                    satellite.name
                );
                applied += 1;
            }
        }
        Ok(applied)
    }
}
