//! Conditional block state.
//!
//! Every `if` pushes a frame; `else` flips it and `endif` pops it.
//! Suppression is sticky: a block inside a suppressed block is suppressed
//! whatever its own condition says.

use wisp_value::ScriptError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    Active,
    Suppressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Block {
    state: BlockState,
    /// Whether the enclosing block was active when this one opened.
    parent_active: bool,
    condition: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockStack {
    blocks: Vec<Block>,
}

impl BlockStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when statements at the current position should execute.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.blocks
            .last()
            .map_or(true, |block| block.state == BlockState::Active)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push_if(&mut self, condition: bool) {
        let parent_active = self.is_active();
        let state = if parent_active && condition {
            BlockState::Active
        } else {
            BlockState::Suppressed
        };
        self.blocks.push(Block {
            state,
            parent_active,
            condition,
        });
    }

    /// Switch the innermost block to its `else` branch.
    pub fn flip_else(&mut self) -> Result<(), ScriptError> {
        let block = self.blocks.last_mut().ok_or(ScriptError::UnbalancedElse)?;
        if block.parent_active {
            block.state = if block.condition {
                BlockState::Suppressed
            } else {
                BlockState::Active
            };
        }
        Ok(())
    }

    pub fn pop_endif(&mut self) -> Result<(), ScriptError> {
        self.blocks
            .pop()
            .map(|_| ())
            .ok_or(ScriptError::UnbalancedEndif)
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
