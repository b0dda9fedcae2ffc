//! Swift source text for a [`GeneratedDeclaration`].

use std::fmt;

use crate::TYPE_NAME;
use crate::generator::{CaseEntry, GeneratedDeclaration};

const MEMBER: &str = "{member}";

/// Accessors shared by every generated enum. Only the member modifier varies.
const ACCESSORS: &str = r#"    {member}var name: String {
        self.rawValue
    }

    @available(iOS 13.0, *)
    @available(macCatalyst 13.0, *)
    @available(macOS 11.0, *)
    @available(tvOS 13.0, *)
    @available(watchOS 6.0, *)
    {member}func image() -> Image {
        Image(systemName: self.rawValue)
    }

    @available(iOS 16.0, *)
    @available(macCatalyst 16.0, *)
    @available(macOS 13.0, *)
    @available(tvOS 16.0, *)
    @available(watchOS 9.0, *)
    {member}func image(variableValue: Double?) -> Image {
        Image(systemName: self.rawValue, variableValue: variableValue)
    }

    #if canImport(UIKit)
    @available(iOS 13.0, *)
    @available(macCatalyst 13.0, *)
    @available(tvOS 13.0, *)
    @available(watchOS 6.0, *)
    {member}func uiImage() -> UIImage {
        UIImage(systemName: self.rawValue)!
    }

    @available(iOS 13.0, *)
    @available(macCatalyst 13.1, *)
    @available(tvOS 13.0, *)
    @available(watchOS 6.0, *)
    {member}func uiImage(withConfiguration configuration: UIImage.Configuration?) -> UIImage {
        UIImage(systemName: self.rawValue, withConfiguration: configuration)!
    }

    @available(iOS 16.0, *)
    @available(macCatalyst 16.0, *)
    @available(tvOS 16.0, *)
    @available(watchOS 9.0, *)
    {member}func uiImage(variableValue: Double, configuration: UIImage.Configuration? = nil) -> UIImage {
        UIImage(systemName: self.rawValue, variableValue: variableValue, configuration: configuration)!
    }

    @available(iOS 13.0, *)
    @available(macCatalyst 13.1, *)
    @available(tvOS 13.0, *)
    {member}func uiImage(compatibleWith traitCollection: UITraitCollection?) -> UIImage {
        UIImage(systemName: self.rawValue, compatibleWith: traitCollection)!
    }
    #elseif canImport(AppKit)
    @available(macOS 11.0, *)
    {member}func nsImage(accessibilityDescription description: String) -> NSImage {
        NSImage(systemSymbolName: self.rawValue, accessibilityDescription: description)!
    }

    @available(macOS 13.0, *)
    {member}func nsImage(variableValue value: Double, accessibilityDescription description: String?) -> NSImage {
        NSImage(systemSymbolName: self.rawValue, variableValue: value, accessibilityDescription: description)!
    }
    #endif
"#;

impl CaseEntry {
    /// The `case` line for this entry, without indentation.
    #[must_use]
    pub fn declaration(&self) -> String {
        match self.raw_value() {
            Some(raw) => format!("case {} = {}", self.identifier(), swift_string(raw)),
            None => format!("case {}", self.identifier()),
        }
    }
}

impl GeneratedDeclaration {
    /// Renders the declaration as Swift source, ending in a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let access = self.access_level();
        let mut out = format!("{}enum {TYPE_NAME}: String {{\n", access.type_modifier());
        for case in self.cases() {
            out.push_str("    ");
            out.push_str(&case.declaration());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&ACCESSORS.replace(MEMBER, access.member_modifier()));
        out.push_str("}\n");
        out
    }

    /// Renders the declaration for insertion at an indented position: every
    /// non-empty line after the first is prefixed with `indent`, and the
    /// trailing newline is dropped.
    #[must_use]
    pub fn render_indented(&self, indent: &str) -> String {
        let rendered = self.render();
        let mut lines = rendered.lines();
        let mut out = lines.next().unwrap_or_default().to_string();
        for line in lines {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(indent);
                out.push_str(line);
            }
        }
        out
    }
}

impl fmt::Display for GeneratedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quotes a raw symbol name as a Swift string literal.
fn swift_string(raw: &str) -> String {
    let mut literal = String::with_capacity(raw.len() + 2);
    literal.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\t' => literal.push_str("\\t"),
            _ => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}
