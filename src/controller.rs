use tracing::{debug, info, warn};

use crate::error::LilError;
use crate::menu::{self, MenuNode, TooltipFallback};
use crate::surface::MenuSurface;
use crate::types::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Empty,
    ShowingCache,
    Loading,
    ShowingFresh,
    ShowingError,
}

pub struct MenuController<S> {
    surface: S,
    state: RenderState,
    fallback: TooltipFallback,
}

impl<S: MenuSurface> MenuController<S> {
    pub fn new(surface: S, fallback: TooltipFallback) -> Self {
        Self {
            surface,
            state: RenderState::Empty,
            fallback,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// First paint. Only valid while nothing has been shown yet.
    pub fn render(&mut self, nodes: Vec<MenuNode>) {
        if self.state != RenderState::Empty {
            warn!(state = ?self.state, "menu already rendered, replacing instead");
        }
        self.replace(nodes);
    }

    /// Swap the whole menu for `nodes`, followed by the quit trailer.
    pub fn replace(&mut self, mut nodes: Vec<MenuNode>) {
        nodes.push(MenuNode::Separator);
        nodes.push(MenuNode::quit());
        self.surface.show(&nodes);
    }

    /// Startup paint: the cached snapshot if there is a usable one, else a
    /// loading placeholder.
    pub fn show_startup(&mut self, cached: Option<Vec<Issue>>) {
        match cached.filter(|issues| !issues.is_empty()) {
            Some(issues) => {
                info!(count = issues.len(), "showing cached issues");
                self.render(menu::render_issues(&issues, self.fallback));
                self.transition(RenderState::ShowingCache);
            }
            None => {
                self.render(vec![MenuNode::disabled(menu::LOADING_TEXT)]);
                self.transition(RenderState::Loading);
            }
        }
    }

    /// The background refresh has started. The cached menu stays visible.
    pub fn refresh_started(&mut self) {
        self.transition(RenderState::Loading);
    }

    pub fn show_fresh(&mut self, issues: &[Issue]) {
        info!(count = issues.len(), "updating menu");
        self.replace(menu::render_issues(issues, self.fallback));
        self.transition(RenderState::ShowingFresh);
    }

    pub fn show_error(&mut self, err: &LilError) {
        self.replace(vec![MenuNode::disabled(format!("Error: {err}"))]);
        self.transition(RenderState::ShowingError);
    }

    fn transition(&mut self, next: RenderState) {
        debug!(from = ?self.state, to = ?next, "render state");
        self.state = next;
    }
}
