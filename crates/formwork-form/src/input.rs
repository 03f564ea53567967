//! Single-line text entry with optional validation

use std::fmt;

use formwork_core::{Command, Component, InputKey, Message, Validatable, ValidationError, Valued};
use formwork_widgets::{palette, Style};

/// Checks a candidate value; `Err` carries the message shown to the user
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send>;

pub const DEFAULT_PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputStyle {
    pub text_base: Style,
    pub text_focus: Style,
    pub prompt_base: Style,
    pub prompt_focus: Style,
    pub placeholder_base: Style,
    pub placeholder_focus: Style,
    pub cursor: Style,
    pub error: Style,
}

impl Default for InputStyle {
    fn default() -> Self {
        let text = Style::new().fg(palette::TEXT);
        let muted = Style::new().fg(palette::MUTED);
        Self {
            text_base: text,
            text_focus: text,
            prompt_base: text,
            prompt_focus: text,
            placeholder_base: muted,
            placeholder_focus: muted,
            cursor: Style::new().fg(palette::ACCENT).reverse(),
            error: Style::new().fg(palette::ERROR),
        }
    }
}

impl InputStyle {
    pub fn plain() -> Self {
        Self {
            text_base: Style::plain(),
            text_focus: Style::plain(),
            prompt_base: Style::plain(),
            prompt_focus: Style::plain(),
            placeholder_base: Style::plain(),
            placeholder_focus: Style::plain(),
            cursor: Style::plain(),
            error: Style::plain(),
        }
    }
}

/// Construction-time settings for an [`Input`]
#[derive(Default)]
pub struct InputConfig {
    pub placeholder: String,
    pub value: String,
    pub validate: Option<Validator>,
    pub style: InputStyle,
}

impl fmt::Debug for InputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputConfig")
            .field("placeholder", &self.placeholder)
            .field("value", &self.value)
            .field("validate", &self.validate.is_some())
            .field("style", &self.style)
            .finish()
    }
}

impl InputConfig {
    /// Unstyled settings, mostly for tests and piped output
    pub fn plain() -> Self {
        Self {
            style: InputStyle::plain(),
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn validate(
        mut self,
        validate: impl Fn(&str) -> Result<(), ValidationError> + Send + 'static,
    ) -> Self {
        self.validate = Some(Box::new(validate));
        self
    }

    pub fn style(mut self, style: InputStyle) -> Self {
        self.style = style;
        self
    }
}

pub struct Input {
    value: Vec<char>,
    /// Insertion point, in chars
    cursor: usize,
    placeholder: String,
    validate: Option<Validator>,
    error: Option<ValidationError>,
    style: InputStyle,
    focus: bool,
}

impl Input {
    pub fn new(config: InputConfig) -> Self {
        let value: Vec<char> = config.value.chars().collect();
        Self {
            cursor: value.len(),
            value,
            placeholder: config.placeholder,
            validate: config.validate,
            error: None,
            style: config.style,
            focus: false,
        }
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focus
    }

    fn handle_key(&mut self, key: InputKey) {
        match key {
            InputKey::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += 1;
            }
            InputKey::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.value.remove(self.cursor);
            }
            InputKey::Delete if self.cursor < self.value.len() => {
                self.value.remove(self.cursor);
            }
            InputKey::Left => self.cursor = self.cursor.saturating_sub(1),
            InputKey::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            InputKey::Home | InputKey::CharCtrl('a') => self.cursor = 0,
            InputKey::End | InputKey::CharCtrl('e') => self.cursor = self.value.len(),
            InputKey::CharCtrl('u') => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            InputKey::CharCtrl('k') => self.value.truncate(self.cursor),
            _ => {}
        }
    }

    fn render_text(&self) -> String {
        let text_style = if self.focus {
            &self.style.text_focus
        } else {
            &self.style.text_base
        };
        if !self.focus {
            return text_style.render(&self.value.iter().collect::<String>());
        }

        let before: String = self.value[..self.cursor].iter().collect();
        let under = self
            .value
            .get(self.cursor)
            .map(char::to_string)
            .unwrap_or_else(|| " ".to_string());
        let after: String = self.value.get(self.cursor + 1..).unwrap_or_default().iter().collect();
        format!(
            "{}{}{}",
            text_style.render(&before),
            self.style.cursor.render(&under),
            text_style.render(&after)
        )
    }

    fn render_placeholder(&self) -> String {
        if self.focus {
            self.style.placeholder_focus.render(&self.placeholder)
        } else {
            self.style.placeholder_base.render(&self.placeholder)
        }
    }
}

impl Component for Input {
    fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::Focus(focus) => self.focus = focus,
            Message::Key(key) if self.focus => self.handle_key(key),
            _ => {}
        }
        Command::none()
    }

    fn view(&self) -> String {
        let prompt = if self.focus {
            self.style.prompt_focus.render(DEFAULT_PROMPT)
        } else {
            self.style.prompt_base.render(DEFAULT_PROMPT)
        };
        let body = if self.value.is_empty() && !self.placeholder.is_empty() {
            self.render_placeholder()
        } else {
            self.render_text()
        };
        match &self.error {
            Some(error) => format!("{prompt}{body}\n{}", self.style.error.render(error.message())),
            None => format!("{prompt}{body}"),
        }
    }

    fn as_validatable(&self) -> Option<&dyn Validatable> {
        Some(self)
    }

    fn as_validatable_mut(&mut self) -> Option<&mut dyn Validatable> {
        Some(self)
    }

    fn as_valued(&self) -> Option<&dyn Valued> {
        Some(self)
    }
}

impl Validatable for Input {
    fn validate(&mut self) -> bool {
        let value = self.value();
        self.error = match &self.validate {
            Some(validate) => validate(&value).err(),
            None => None,
        };
        self.error.is_none()
    }

    fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }
}

impl Valued for Input {
    fn value(&self) -> String {
        self.value.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::testing::{press, type_text};

    fn focused(config: InputConfig) -> Input {
        let mut input = Input::new(config);
        input.update(Message::Focus(true));
        input
    }

    fn port() -> InputConfig {
        InputConfig::plain().validate(|value: &str| match value.parse::<u16>() {
            Ok(_) => Ok(()),
            Err(_) if value.is_empty() => Err(ValidationError::new("port is required")),
            Err(_) => Err(ValidationError::new("port must be a number")),
        })
    }

    #[test]
    fn test_keys_ignored_without_focus() {
        let mut input = Input::new(InputConfig::plain());
        type_text(&mut input, "abc");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_editing() {
        let mut input = focused(InputConfig::plain());
        type_text(&mut input, "helo");
        press(&mut input, InputKey::Left);
        type_text(&mut input, "l");
        assert_eq!(input.value(), "hello");

        press(&mut input, InputKey::Home);
        press(&mut input, InputKey::Delete);
        press(&mut input, InputKey::End);
        press(&mut input, InputKey::Backspace);
        assert_eq!(input.value(), "ell");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_ctrl_u_clears_before_cursor() {
        let mut input = focused(InputConfig::plain().value("root@host"));
        for _ in 0..4 {
            press(&mut input, InputKey::Left);
        }
        press(&mut input, InputKey::CharCtrl('u'));
        assert_eq!(input.value(), "host");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut input = Input::new(InputConfig::plain().placeholder("22"));
        assert_eq!(input.view(), "> 22");
        input.set_value("2222");
        assert_eq!(input.view(), "> 2222");
    }

    #[test]
    fn test_validation_error_rendered_beneath() {
        let mut input = focused(port());
        assert!(!input.validate());
        assert_eq!(input.error().map(|e| e.message()), Some("port is required"));
        // Focused and empty: the cursor sits on a blank cell
        assert_eq!(input.view(), ">  \nport is required");

        type_text(&mut input, "22a");
        assert!(!input.validate());
        assert_eq!(input.error().map(|e| e.message()), Some("port must be a number"));

        press(&mut input, InputKey::Backspace);
        assert!(input.validate());
        assert!(input.error().is_none());
        assert_eq!(input.view(), "> 22 ");
    }

    #[test]
    fn test_no_validator_always_valid() {
        let mut input = Input::new(InputConfig::plain());
        assert!(input.validate());
    }
}
