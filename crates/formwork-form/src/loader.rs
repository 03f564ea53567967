//! Lazily built child, rebuilt whenever its binding snapshot changes
//!
//! When the loader gains focus it takes a fresh snapshot of its bindings and
//! hashes it. A hash different from the stored one starts a build: the
//! request counter is bumped, the loader shows a spinner, and the factory
//! runs off the dispatch loop with the snapshot taken at that moment. The
//! finished child comes back as [`Message::Loaded`] carrying the loader id,
//! request id and hash it was started with, and is committed only if all
//! three still match. Anything else answers a question nobody is asking any
//! more and is dropped.
//!
//! While a build is in flight the previous child is unreachable through
//! [`Component::child`] and the loader fails validation, so a form cannot
//! advance past it with a value that belongs to an older snapshot.

use std::sync::Arc;

use formwork_core::{
    resolve_validatable, resolve_validatable_mut, Command, Component, ContentHash, Loaded, Message,
    NodeId, RequestTag, Validatable, ValidationError,
};
use formwork_widgets::{Spinner, SpinnerStyle};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Builds a child from a binding snapshot. Runs off the dispatch loop.
pub type Factory = Arc<dyn Fn(Value) -> Box<dyn Component> + Send + Sync>;

/// Produces the current binding snapshot. Runs on the dispatch loop.
pub type Bindings = Box<dyn Fn() -> Value + Send>;

pub const DEFAULT_PLACEHOLDER: &str = "No component";

/// Validation error reported while a build is in flight
pub const LOADING_ERROR: &str = "still loading";

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub spinner: SpinnerStyle,
    /// Shown when nothing has been loaded and nothing is loading
    pub placeholder: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            spinner: SpinnerStyle::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn plain() -> Self {
        Self {
            spinner: SpinnerStyle::plain(),
            ..Self::default()
        }
    }
}

pub struct Loader {
    id: NodeId,
    factory: Factory,
    bindings: Bindings,
    request_id: u64,
    hash: Option<ContentHash>,
    child: Option<Box<dyn Component>>,
    focus: bool,
    loading: bool,
    spinner: Spinner,
    placeholder: String,
    error: Option<ValidationError>,
}

impl Loader {
    pub fn new<F, C>(factory: F, config: LoaderConfig) -> Self
    where
        F: Fn(Value) -> C + Send + Sync + 'static,
        C: Component + 'static,
    {
        Self {
            id: NodeId::next(),
            factory: Arc::new(move |snapshot| Box::new(factory(snapshot)) as Box<dyn Component>),
            bindings: Box::new(|| Value::Null),
            request_id: 0,
            hash: None,
            child: None,
            focus: false,
            loading: false,
            spinner: Spinner::new(config.spinner),
            placeholder: config.placeholder,
            error: None,
        }
    }

    /// Observe `bindings`; a change in its serialized form triggers a rebuild
    /// the next time the loader gains focus
    pub fn with_bindings<F, T>(mut self, bindings: F) -> Self
    where
        F: Fn() -> T + Send + 'static,
        T: Serialize,
    {
        self.bindings = Box::new(move || {
            serde_json::to_value(bindings()).unwrap_or_else(|err| {
                warn!(error = %err, "loader bindings are not serializable");
                Value::Null
            })
        });
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn hash(&self) -> Option<ContentHash> {
        self.hash
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current binding snapshot
    pub fn bindings(&self) -> Value {
        (self.bindings)()
    }

    fn dispatch(&mut self, snapshot: Value, hash: ContentHash) -> Command {
        self.loading = true;
        self.request_id += 1;

        let loader = self.id;
        let tag = RequestTag {
            request_id: self.request_id,
            hash,
        };
        debug!(
            %loader,
            request_id = tag.request_id,
            hash = %hash.short(),
            "dispatching load"
        );

        let factory = Arc::clone(&self.factory);
        Command::perform(move || {
            Message::Loaded(Loaded {
                loader,
                tag,
                child: factory(snapshot),
            })
        })
        .and(self.spinner.tick())
    }

    /// Commit `loaded` if it answers the current request. Returns whether
    /// it did.
    fn commit(&mut self, loaded: Loaded) -> bool {
        let current = self.hash.map(|hash| RequestTag {
            request_id: self.request_id,
            hash,
        });
        if current != Some(loaded.tag) {
            debug!(
                loader = %self.id,
                request_id = loaded.tag.request_id,
                current_request_id = self.request_id,
                "dropping stale load result"
            );
            return false;
        }
        self.child = Some(loaded.child);
        self.loading = false;
        self.error = None;
        true
    }
}

impl Component for Loader {
    fn update(&mut self, msg: Message) -> Command {
        let focus = self.focus;
        let mut committed = false;

        let msg = match msg {
            Message::Loaded(loaded) if loaded.loader == self.id => {
                committed = self.commit(loaded);
                None
            }
            Message::Focus(focus) => {
                self.focus = focus;
                None
            }
            other => Some(other),
        };

        let mut cmd = Command::none();
        if self.focus && !focus {
            let snapshot = self.bindings();
            match ContentHash::of(&snapshot) {
                Ok(hash) if Some(hash) != self.hash => {
                    self.hash = Some(hash);
                    cmd = cmd.and(self.dispatch(snapshot, hash));
                }
                Ok(_) => {}
                Err(err) => warn!(loader = %self.id, error = %err, "failed to hash bindings"),
            }
        }

        if self.loading {
            if let Some(msg) = msg {
                cmd = cmd.and(self.spinner.update(msg));
            }
        } else if let Some(child) = self.child.as_mut() {
            if committed {
                cmd = cmd.and(child.init());
            }
            if committed || self.focus != focus {
                cmd = cmd.and(child.update(Message::Focus(self.focus)));
            }
            if let Some(msg) = msg {
                cmd = cmd.and(child.update(msg));
            }
        }
        cmd
    }

    fn view(&self) -> String {
        if self.loading {
            return self.spinner.view();
        }
        match &self.child {
            Some(child) => child.view(),
            None => self.placeholder.clone(),
        }
    }

    fn child(&self) -> Option<&dyn Component> {
        if self.loading {
            return None;
        }
        self.child.as_deref()
    }

    fn child_mut(&mut self) -> Option<&mut dyn Component> {
        if self.loading {
            return None;
        }
        match &mut self.child {
            Some(child) => Some(child.as_mut()),
            None => None,
        }
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        Some(self)
    }

    fn as_validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
        Some(self)
    }

    fn contains_node(&self, id: NodeId) -> bool {
        id == self.id
            || self.spinner.contains_node(id)
            || self.child.as_ref().is_some_and(|child| child.contains_node(id))
    }
}

/// Fails while loading; otherwise defers to the committed child, if it
/// validates at all
impl Validatable for Loader {
    fn validate(&mut self) -> bool {
        if self.loading {
            self.error = Some(ValidationError::new(LOADING_ERROR));
            return false;
        }
        self.error = None;
        let Some(child) = self.child.as_mut() else {
            return true;
        };
        match resolve_validatable_mut(child.as_mut()) {
            Some(validatable) => validatable.validate(),
            None => true,
        }
    }

    fn error(&self) -> Option<&ValidationError> {
        if self.error.is_some() {
            return self.error.as_ref();
        }
        self.child().and_then(resolve_validatable).and_then(|v| v.error())
    }
}
