//! Server connection demo
//!
//! A form asking for host, port, user and an auth method, followed by either
//! a key picked from a lazily loaded list or a password, then a simulated
//! connection. The key list is rebuilt whenever the user changes, and the
//! key and password items show up only for their auth method.

use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use formwork_core::prelude::*;
use formwork_core::{Command, Component, KeyBinding, Keyed, Message, ValidationError};
use formwork_form::{
    Field, FieldStyle, Form, FormConfig, FormHandle, FormItem, Hide, Input, InputConfig,
    InputStyle, Loader, LoaderConfig, Select, SelectConfig, SelectItem, Skip,
};
use formwork_tui::{Help, HelpStyle};
use formwork_widgets::{
    palette, Button, ButtonStyle, OptionItem, OptionItemStyle, Spinner, SpinnerStyle, Style, Text,
    TextStyle,
};
use regex::Regex;

use crate::settings::{AppKeyMap, Settings};

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("Hostname regex pattern is valid")
});

const SIMULATED_LATENCY: Duration = Duration::from_secs(1);

/// Lists the keys offered for `user`. Runs off the dispatch loop.
pub type KeyLister = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Opens the connection. Runs off the dispatch loop.
pub type Connector = Arc<dyn Fn(&ConnectRequest) -> std::result::Result<(), String> + Send + Sync>;

/// Side effects of the demo, swappable for tests
#[derive(Clone)]
pub struct Services {
    pub list_keys: KeyLister,
    pub connect: Connector,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            list_keys: Arc::new(ssh_keys),
            connect: Arc::new(simulate_connect),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Key(String),
    Password(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub auth: Auth,
}

impl fmt::Display for ConnectRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.port)
    }
}

/// Result of a connection attempt, delivered as a custom message
#[derive(Debug)]
struct ConnectOutcome(std::result::Result<(), String>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Form,
    Connecting(String),
    Connected { target: String, at: String },
    Failed(String),
    Cancelled,
}

/// Widget styles for one run, colored or plain
#[derive(Debug, Clone)]
struct Theme {
    header: Style,
    button: ButtonStyle,
    option: OptionItemStyle,
    text: TextStyle,
    field: FieldStyle,
    input: InputStyle,
    loader: LoaderConfig,
    spinner: SpinnerStyle,
    help: HelpStyle,
}

impl Theme {
    fn new(plain: bool) -> Self {
        if plain {
            return Self {
                header: Style::plain(),
                button: ButtonStyle::plain(),
                option: OptionItemStyle::plain(),
                text: TextStyle::plain(),
                field: FieldStyle::plain(),
                input: InputStyle::plain(),
                loader: LoaderConfig::plain(),
                spinner: SpinnerStyle::plain(),
                help: HelpStyle::plain(),
            };
        }
        Self {
            header: Style::new()
                .fg(palette::TEXT)
                .bold()
                .bg(palette::ACCENT)
                .padding_x(2),
            button: ButtonStyle::default(),
            option: OptionItemStyle::default(),
            text: TextStyle::default(),
            field: FieldStyle::default(),
            input: InputStyle::default(),
            loader: LoaderConfig::default(),
            spinner: SpinnerStyle::default(),
            help: HelpStyle::default(),
        }
    }
}

pub struct Demo {
    form: Form,
    handle: FormHandle,
    spinner: Spinner,
    help: Help,
    keys: AppKeyMap,
    theme: Theme,
    services: Services,
    status: Status,
}

impl Demo {
    pub fn new(settings: &Settings, services: Services) -> Self {
        let theme = Theme::new(settings.ui.plain);
        let handle = FormHandle::new();
        let form = build_form(settings, &theme, &handle, &services);
        Self {
            form,
            handle,
            spinner: Spinner::new(theme.spinner.clone()),
            help: Help::new(theme.help),
            keys: settings.keys.app.clone(),
            theme,
            services,
            status: Status::Form,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn handle(&self) -> &FormHandle {
        &self.handle
    }

    /// Connection parameters from the completed form
    pub fn request(&self) -> Option<ConnectRequest> {
        let port = self.form.value("port")?.parse().ok()?;
        let auth = match self.form.value("auth")?.as_str() {
            "key" => Auth::Key(self.form.value("key")?),
            _ => Auth::Password(self.form.value("password")?),
        };
        Some(ConnectRequest {
            host: self.form.value("host")?,
            port,
            user: self.form.value("user")?,
            auth,
        })
    }

    fn connect(&mut self) -> Command {
        let Some(request) = self.request() else {
            // Validation makes this unreachable unless a field was bypassed
            warn!("form completed with incomplete values: {:?}", self.form.values());
            self.status = Status::Failed("incomplete connection details".to_string());
            return Command::quit();
        };
        info!("connecting to {}", request);
        self.status = Status::Connecting(request.to_string());

        let connect = Arc::clone(&self.services.connect);
        Command::perform(move || Message::custom(ConnectOutcome(connect(&request))))
            .and(self.spinner.tick())
    }

    fn finish(&mut self, outcome: ConnectOutcome) -> Command {
        let target = match &self.status {
            Status::Connecting(target) => target.clone(),
            _ => return Command::none(),
        };
        self.status = match outcome.0 {
            Ok(()) => {
                info!("connected to {}", target);
                Status::Connected {
                    target,
                    at: chrono::Local::now().format("%H:%M:%S").to_string(),
                }
            }
            Err(e) => {
                warn!("connection to {} failed: {}", target, e);
                Status::Failed(e)
            }
        };
        Command::quit()
    }

    fn short_help(&self) -> Vec<KeyBinding> {
        vec![self.keys.help.clone(), self.keys.exit.clone()]
    }

    fn full_help(&self) -> Vec<Vec<KeyBinding>> {
        vec![self.form.keys(), self.short_help()]
    }
}

impl Component for Demo {
    fn init(&mut self) -> Command {
        self.form.init()
    }

    fn update(&mut self, msg: Message) -> Command {
        if let Message::Key(key) = &msg {
            if self.keys.exit.matches(key) {
                info!("cancelled by user");
                self.status = Status::Cancelled;
                return Command::quit();
            }
        }

        match self.status {
            Status::Form => {
                if let Message::Key(key) = &msg {
                    if self.keys.help.matches(key) {
                        self.help.toggle();
                        return Command::none();
                    }
                }
                let cmd = self.form.update(msg);
                if self.form.completed() {
                    return cmd.and(self.connect());
                }
                cmd
            }
            Status::Connecting(_) => match msg {
                Message::Custom(payload) => match payload.downcast::<ConnectOutcome>() {
                    Ok(outcome) => self.finish(*outcome),
                    Err(_) => Command::none(),
                },
                other => self.spinner.update(other),
            },
            _ => Command::none(),
        }
    }

    fn view(&self) -> String {
        let mut s = self.theme.header.render("formwork: connect");

        match &self.status {
            Status::Form => {
                s.push_str(&format!("\n\n{}", self.form.view()));
                s.push_str(&format!(
                    "\n\n{}",
                    self.help.view(&self.short_help(), &self.full_help())
                ));
            }
            Status::Connecting(target) => {
                s.push_str(&format!(
                    "\n\n{} Connecting to {}...",
                    self.spinner.view(),
                    target
                ));
            }
            Status::Connected { target, at } => {
                s.push_str(&format!(
                    "\n\nSuccessfully connected to {} at {}!",
                    target, at
                ));
            }
            Status::Failed(e) => s.push_str(&format!("\n\nConnection failed: {}", e)),
            Status::Cancelled => s.push_str("\n\nOperation cancelled."),
        }

        s.push('\n');
        s
    }

    fn contains_node(&self, id: formwork_core::NodeId) -> bool {
        self.spinner.contains_node(id) || self.form.contains_node(id)
    }
}

fn build_form(settings: &Settings, theme: &Theme, handle: &FormHandle, services: &Services) -> Form {
    let select_config = |inline| SelectConfig {
        keymap: settings.keys.select.clone(),
        inline,
    };
    let input = |placeholder: &str, validate: fn(&str) -> std::result::Result<(), ValidationError>| {
        Input::new(
            InputConfig::default()
                .placeholder(placeholder)
                .validate(validate)
                .style(theme.input),
        )
    };

    let auth = Select::new(
        vec![
            SelectItem::new("key", Button::new("Key", theme.button)),
            SelectItem::new("password", Button::new("Password", theme.button)),
        ],
        select_config(settings.ui.inline_select),
    );

    let keys = {
        let list_keys = Arc::clone(&services.list_keys);
        let option = theme.option;
        let config = select_config(false);
        Loader::new(
            move |snapshot| {
                let user = snapshot.as_str().unwrap_or_default().to_string();
                let items = list_keys(&user)
                    .into_iter()
                    .map(|path| SelectItem::new(path.clone(), OptionItem::new(path, option)))
                    .collect();
                Select::new(items, config.clone())
            },
            theme.loader.clone(),
        )
        .with_bindings({
            let handle = handle.clone();
            move || handle.value("user")
        })
    };

    let uses = |method: &'static str| {
        let handle = handle.clone();
        move || !handle.is("auth", method)
    };

    Form::new(
        vec![
            FormItem::new(
                "host",
                Field::new("Enter the server host", input("10.0.0.1", validate_host), theme.field),
            ),
            FormItem::new(
                "port",
                Field::new("Enter the server port", input("22", validate_port), theme.field),
            ),
            FormItem::new(
                "user",
                Field::new("Enter the auth user", input("root", validate_user), theme.field),
            ),
            FormItem::new(
                "auth",
                Field::new("Select an auth method", auth, theme.field),
            ),
            FormItem::new(
                "key",
                Hide::new(Field::new("Select the auth key", keys, theme.field)).when(uses("key")),
            ),
            FormItem::new(
                "password-note",
                Hide::new(Skip::new(Text::new(
                    "Note: Passwords are not recommended for use in production environments.",
                    theme.text,
                )))
                .when(uses("password")),
            ),
            FormItem::new(
                "password",
                Hide::new(Field::new(
                    "Enter the auth password",
                    input("", validate_password),
                    theme.field,
                ))
                .when(uses("password")),
            ),
        ],
        FormConfig {
            keymap: settings.keys.form.clone(),
        },
    )
    .with_handle(handle.clone())
}

pub fn validate_host(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("host is required"));
    }
    if value.parse::<IpAddr>().is_ok() || HOSTNAME.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("host must be an IP address or hostname"))
    }
}

pub fn validate_port(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("port is required"));
    }
    match value.parse::<u16>() {
        Ok(0) | Err(_) => Err(ValidationError::new("port must be a number between 1 and 65535")),
        Ok(_) => Ok(()),
    }
}

pub fn validate_user(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("user is required"));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("password is required"));
    }
    Ok(())
}

/// Private keys in `~/.ssh`, or a placeholder list when there are none
pub fn ssh_keys(user: &str) -> Vec<String> {
    std::thread::sleep(SIMULATED_LATENCY);
    debug!("listing keys for {:?}", user);

    let mut keys: Vec<String> = dirs::home_dir()
        .map(|home| home.join(".ssh"))
        .and_then(|dir| std::fs::read_dir(dir).ok())
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_private_key(path))
        .map(|path| path.display().to_string())
        .collect();
    keys.sort();

    if keys.is_empty() {
        keys = (1..=3).map(|i| format!("/path/to/key-{i}")).collect();
    }
    keys
}

fn is_private_key(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("id_") && !name.ends_with(".pub"))
}

fn simulate_connect(request: &ConnectRequest) -> std::result::Result<(), String> {
    debug!("simulating connection to {}", request);
    std::thread::sleep(SIMULATED_LATENCY);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host() {
        assert!(validate_host("10.0.0.1").is_ok());
        assert!(validate_host("::1").is_ok());
        assert!(validate_host("build-01.example.com").is_ok());
        assert_eq!(
            validate_host("").unwrap_err().message(),
            "host is required"
        );
        assert!(validate_host("bad host").is_err());
        assert!(validate_host("-leading.dash").is_err());
    }

    #[test]
    fn test_validate_port() {
        assert!(validate_port("22").is_ok());
        assert!(validate_port("65535").is_ok());
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("ssh").is_err());
        assert_eq!(validate_port("").unwrap_err().message(), "port is required");
    }

    #[test]
    fn test_private_key_filter() {
        assert!(is_private_key(Path::new("/home/u/.ssh/id_ed25519")));
        assert!(!is_private_key(Path::new("/home/u/.ssh/id_ed25519.pub")));
        assert!(!is_private_key(Path::new("/home/u/.ssh/known_hosts")));
    }

    #[test]
    fn test_request_display() {
        let request = ConnectRequest {
            host: "10.0.0.1".into(),
            port: 22,
            user: "root".into(),
            auth: Auth::Password("secret".into()),
        };
        assert_eq!(request.to_string(), "root@10.0.0.1:22");
    }

    #[test]
    fn test_plain_theme_header() {
        let demo = Demo::new(
            &Settings {
                ui: crate::settings::UiSettings {
                    plain: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            Services::default(),
        );
        assert!(demo.view().starts_with("formwork: connect\n\n"));
        assert_eq!(demo.status(), &Status::Form);
    }
}
