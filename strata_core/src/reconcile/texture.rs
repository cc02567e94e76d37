// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture requests and the completion guard.
//!
//! The reconciler never loads images. It hands the host a
//! [`TextureRequest`] carrying a fresh [`TextureToken`] and returns
//! immediately. When the host's load finishes it calls
//! [`SceneGraphState::texture_loaded`]; a completion is applied only if its
//! token is still the one the mesh is waiting for. Anything else (the view
//! was destroyed, or its content changed again) is handed back as
//! [`LoadOutcome::Discarded`] so the host can free it.

use alloc::string::{String, ToString};

use super::{SceneGraphState, SyncIssue};
use crate::error::{SyncError, TextureError};
use crate::scene::TextureId;
use crate::trace::{TextureEvent, TextureEventKind, Tracer};

/// Identifies one texture request.
///
/// Tokens are never reused within a [`SceneGraphState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureToken(pub(crate) u64);

impl TextureToken {
    /// The raw token value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A request for the host to load a view's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureRequest<'a> {
    /// Pass back to [`SceneGraphState::texture_loaded`] or
    /// [`SceneGraphState::texture_failed`].
    pub token: TextureToken,
    /// Id of the view.
    pub node_id: &'a str,
    /// Content reference.
    pub url: &'a str,
    /// Fetch revision of the content.
    pub revision: u64,
}

/// Starts texture loads on behalf of the reconciler.
pub trait TextureLoader {
    /// Starts loading `request`. Must not block on the load itself.
    ///
    /// # Errors
    ///
    /// [`TextureError::Unavailable`] if the load cannot even start; the view
    /// then renders untextured. [`TextureError::ContextLost`] aborts the
    /// running sync.
    fn request(&mut self, request: &TextureRequest<'_>) -> Result<(), TextureError>;
}

impl<F> TextureLoader for F
where
    F: FnMut(&TextureRequest<'_>) -> Result<(), TextureError>,
{
    fn request(&mut self, request: &TextureRequest<'_>) -> Result<(), TextureError> {
        self(request)
    }
}

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Bound to the waiting mesh.
    Applied,
    /// The token was stale. The host still owns the texture and should free it.
    Discarded(TextureId),
}

impl SceneGraphState {
    /// Delivers a finished load.
    ///
    /// The texture is bound only if `token` is the latest request of a live
    /// view. A texture it replaces shows up in the next
    /// [`SceneChanges::released_textures`](crate::scene::SceneChanges::released_textures).
    pub fn texture_loaded(
        &mut self,
        token: TextureToken,
        texture: TextureId,
        tracer: &mut Tracer<'_>,
    ) -> LoadOutcome {
        let node = self
            .loads
            .remove(&token)
            .and_then(|id| self.retained.get_mut(&id))
            .filter(|node| node.texture_token == Some(token));
        let outcome = match node {
            Some(node) => {
                node.texture_token = None;
                self.store.set_texture(node.mesh, Some(texture));
                LoadOutcome::Applied
            }
            None => LoadOutcome::Discarded(texture),
        };
        tracer.texture(&TextureEvent {
            token,
            kind: match outcome {
                LoadOutcome::Applied => TextureEventKind::Applied,
                LoadOutcome::Discarded(_) => TextureEventKind::Discarded,
            },
        });
        outcome
    }

    /// Reports a failed load.
    ///
    /// Returns the issue for a current request, or `None` if the token was
    /// already stale, which is traced as a discard. The view keeps rendering
    /// without the new content.
    pub fn texture_failed(
        &mut self,
        token: TextureToken,
        reason: &str,
        tracer: &mut Tracer<'_>,
    ) -> Option<SyncIssue> {
        let node_id = self.loads.remove(&token);
        let node = node_id
            .as_deref()
            .and_then(|id| self.retained.get_mut(id))
            .filter(|node| node.texture_token == Some(token));
        let (Some(node_id), Some(node)) = (node_id, node) else {
            tracer.texture(&TextureEvent {
                token,
                kind: TextureEventKind::Discarded,
            });
            return None;
        };
        node.texture_token = None;
        tracer.texture(&TextureEvent {
            token,
            kind: TextureEventKind::Failed,
        });
        let issue = SyncIssue::TextureUnavailable {
            node_id,
            reason: reason.to_string(),
        };
        tracer.issue(&issue);
        Some(issue)
    }

    /// Asks `loader` for the content of view `id`, superseding any request
    /// still in flight.
    ///
    /// An empty `url` clears the binding instead.
    pub(super) fn request_texture(
        &mut self,
        id: &str,
        url: &str,
        revision: u64,
        loader: &mut dyn TextureLoader,
        tracer: &mut Tracer<'_>,
    ) -> Result<Option<SyncIssue>, SyncError> {
        let Some(node) = self.retained.get_mut(id) else {
            return Ok(None);
        };
        if let Some(stale) = node.texture_token.take() {
            self.loads.remove(&stale);
        }
        node.content_pending = false;
        if url.is_empty() {
            if self.store.texture(node.mesh).is_some() {
                self.store.set_texture(node.mesh, None);
            }
            return Ok(None);
        }

        let token = TextureToken(self.next_token);
        self.next_token += 1;
        let request = TextureRequest {
            token,
            node_id: id,
            url,
            revision,
        };
        tracer.texture(&TextureEvent {
            token,
            kind: TextureEventKind::Requested,
        });
        match loader.request(&request) {
            Ok(()) => {
                node.texture_token = Some(token);
                self.loads.insert(token, String::from(id));
                Ok(None)
            }
            Err(TextureError::Unavailable(reason)) => {
                if self.store.texture(node.mesh).is_some() {
                    self.store.set_texture(node.mesh, None);
                }
                Ok(Some(SyncIssue::TextureUnavailable {
                    node_id: String::from(id),
                    reason,
                }))
            }
            Err(TextureError::ContextLost) => {
                node.content_pending = true;
                Err(SyncError::ContextLost)
            }
        }
    }
}
