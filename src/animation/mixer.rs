use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::action::{ActionEvent, AnimationAction, ChannelValue};
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// Index of an action inside its [`AnimationMixer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(usize);

/// Transform values captured when the first action is scheduled,
/// restored when the last one is stopped.
#[derive(Debug, Clone, Copy)]
struct OriginalState {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

/// Drives a set of actions on a single target node.
pub struct AnimationMixer {
    root: NodeHandle,
    actions: Vec<AnimationAction>,
    original: Option<OriginalState>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: NodeHandle) -> Self {
        Self {
            root,
            actions: Vec::new(),
            original: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Returns the action for `clip`, creating it on first use.
    pub fn clip_action(&mut self, clip: &Arc<AnimationClip>) -> ActionHandle {
        if let Some(i) = self.actions.iter().position(|a| Arc::ptr_eq(a.clip(), clip)) {
            return ActionHandle(i);
        }
        self.actions.push(AnimationAction::new(Arc::clone(clip)));
        ActionHandle(self.actions.len() - 1)
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle.0)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle.0)
    }

    /// Schedules an action, capturing the target's transform if nothing was
    /// playing before.
    pub fn play(&mut self, handle: ActionHandle, scene: &Scene) {
        if self.original.is_none()
            && let Some(node) = scene.get_node(self.root)
        {
            self.original = Some(OriginalState {
                position: node.transform.position,
                rotation: node.transform.rotation,
                scale: node.transform.scale,
            });
        }
        if let Some(action) = self.actions.get_mut(handle.0) {
            action.play();
        }
    }

    /// Stops an action. Once no action remains scheduled the target's
    /// transform is restored to its captured state.
    pub fn stop(&mut self, handle: ActionHandle, scene: &mut Scene) {
        if let Some(action) = self.actions.get_mut(handle.0) {
            action.stop();
        }
        if self.actions.iter().any(AnimationAction::is_scheduled) {
            return;
        }
        if let Some(original) = self.original.take()
            && let Some(node) = scene.get_node_mut(self.root)
        {
            node.transform.position = original.position;
            node.transform.rotation = original.rotation;
            node.transform.scale = original.scale;
        }
    }

    /// Stops every action and restores the target.
    pub fn stop_all(&mut self, scene: &mut Scene) {
        for i in 0..self.actions.len() {
            self.stop(ActionHandle(i), scene);
        }
    }

    /// Advances all actions and writes the sampled values to the target.
    ///
    /// Returns the handles of actions that finished during this step.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) -> Vec<ActionHandle> {
        let mut finished = Vec::new();

        for (i, action) in self.actions.iter_mut().enumerate() {
            let event = action.update(dt);
            if event == ActionEvent::None {
                continue;
            }
            if event == ActionEvent::Finished {
                finished.push(ActionHandle(i));
            }

            let Some(node) = scene.get_node_mut(self.root) else {
                continue;
            };
            for value in action.samples() {
                match value {
                    ChannelValue::Translation(v) => node.transform.position = v,
                    ChannelValue::Rotation(q) => node.transform.rotation = q,
                    ChannelValue::Scale(s) => node.transform.scale = s,
                }
            }
        }

        finished
    }
}
