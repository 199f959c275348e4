//! This implements a very basic style engine: style rules whose selectors are
//! descendant chains of `#id`, `.class` and type selectors, and declarations
//! kept as raw text. There's no inheritance, no `!important`, and no at-rule
//! support.
//!
//! Rules are matched when an element is created, so only the rules ingested
//! up to that point apply to it.
//!
//! Syntax errors drop the offending rule or declaration with a warning; they
//! never fail the document.

use crate::dom::ElementData;
use crate::style::ComputedStyle;
use cssparser::{CowRcStr, Parser, ParserInput, ParserState, RuleBodyParser, StyleSheetParser};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// The selector chain of a rule, target first.
pub type SelectorParts = SmallVec<[SimpleSelector; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// `#foo`
    Id(String),
    /// `.foo`
    Class(String),
    /// `foo`, lower-cased.
    Type(String),
    /// Anything else, which never matches.
    Unsupported(String),
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_identifier_char)
}

impl SimpleSelector {
    pub fn parse(selector: &str) -> Self {
        if let Some(id) = selector.strip_prefix('#') {
            if is_identifier(id) {
                return SimpleSelector::Id(id.to_owned());
            }
        } else if let Some(class) = selector.strip_prefix('.') {
            if is_identifier(class) {
                return SimpleSelector::Class(class.to_owned());
            }
        } else if is_identifier(selector) {
            return SimpleSelector::Type(selector.to_ascii_lowercase());
        }
        SimpleSelector::Unsupported(selector.to_owned())
    }

    /// Whether `element` is matched by this selector on its own.
    pub fn matches(&self, element: &ElementData) -> bool {
        match *self {
            SimpleSelector::Id(ref id) => element.attribute("id") == Some(&**id),
            SimpleSelector::Class(ref class) => element.attribute("class") == Some(&**class),
            SimpleSelector::Type(ref name) => element.name == *name,
            SimpleSelector::Unsupported(..) => false,
        }
    }
}

/// Specificity of a selector, compared lexicographically.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }

    pub fn of(parts: &[SimpleSelector]) -> Self {
        let mut specificity = Self::default();
        for part in parts {
            match *part {
                SimpleSelector::Id(..) => specificity.ids += 1,
                SimpleSelector::Class(..) => specificity.classes += 1,
                SimpleSelector::Type(..) => specificity.types += 1,
                SimpleSelector::Unsupported(..) => {}
            }
        }
        specificity
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.ids, self.classes, self.types)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name.
    pub name: String,
    /// Trimmed source text of the value.
    pub value: String,
}

/// A rule with a single selector. A selector list produces one of these per
/// selector, sharing the declarations.
#[derive(Debug, Clone)]
pub struct Rule {
    selector_parts: SelectorParts,
    declarations: Rc<[Declaration]>,
    specificity: Specificity,
}

impl Rule {
    pub fn new(selector: &str, declarations: Rc<[Declaration]>) -> Self {
        let mut selector_parts = selector
            .split_whitespace()
            .map(SimpleSelector::parse)
            .collect::<SelectorParts>();
        selector_parts.reverse();
        let specificity = Specificity::of(&selector_parts);
        Self {
            selector_parts,
            declarations,
            specificity,
        }
    }

    /// The simple selectors of this rule, the target one first.
    pub fn selector_parts(&self) -> &[SimpleSelector] {
        &self.selector_parts
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Whether this rule applies to `element`, given its ancestors from the
    /// innermost to the outermost.
    ///
    /// Ancestors that don't match the next selector are skipped, so this
    /// implements the descendant combinator.
    pub fn matches(&self, element: &ElementData, ancestors: &[&ElementData]) -> bool {
        let (target, rest) = match self.selector_parts.split_first() {
            Some(parts) => parts,
            None => return false,
        };
        if !target.matches(element) {
            return false;
        }
        let mut j = 0;
        for ancestor in ancestors {
            if j < rest.len() && rest[j].matches(ancestor) {
                j += 1;
            }
        }
        j == rest.len()
    }
}

#[derive(Debug)]
pub enum RuleError {
    EmptySelector,
    EmptyValue,
}

pub type ParseError<'i> = cssparser::ParseError<'i, RuleError>;

/// The result of parsing a qualified rule: the selector texts of the prelude
/// and the declaration block.
struct StyleRule {
    selectors: Vec<String>,
    declarations: Vec<Declaration>,
}

struct StyleSheetRuleParser;

impl<'i> cssparser::AtRuleParser<'i> for StyleSheetRuleParser {
    type Prelude = ();
    type AtRule = StyleRule;
    type Error = RuleError;

    // Default methods reject everything.
}

impl<'i> cssparser::QualifiedRuleParser<'i> for StyleSheetRuleParser {
    type Prelude = Vec<String>;
    type QualifiedRule = StyleRule;
    type Error = RuleError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i>> {
        let location = input.current_source_location();
        let position = input.position();
        while input.next().is_ok() {}
        let selectors = input
            .slice_from(position)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if selectors.is_empty() {
            return Err(location.new_custom_error(RuleError::EmptySelector));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<StyleRule, ParseError<'i>> {
        Ok(StyleRule {
            selectors,
            declarations: parse_declarations(input),
        })
    }
}

struct PropertyDeclarationParser;

impl<'i> cssparser::DeclarationParser<'i> for PropertyDeclarationParser {
    type Declaration = Declaration;
    type Error = RuleError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _declaration_start: &ParserState,
    ) -> Result<Declaration, ParseError<'i>> {
        let position = input.position();
        while input.next().is_ok() {}
        let value = input.slice_from(position).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(RuleError::EmptyValue));
        }
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value: value.to_owned(),
        })
    }
}

impl<'i> cssparser::AtRuleParser<'i> for PropertyDeclarationParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = RuleError;
}

impl<'i> cssparser::QualifiedRuleParser<'i> for PropertyDeclarationParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = RuleError;
}

impl<'i> cssparser::RuleBodyItemParser<'i, Declaration, RuleError> for PropertyDeclarationParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

fn parse_declarations(input: &mut Parser) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut parser = PropertyDeclarationParser;
    for result in RuleBodyParser::new(input, &mut parser) {
        match result {
            Ok(declaration) => declarations.push(declaration),
            Err((error, slice)) => warn!("CSS declaration dropped: {:?}, {:?}", error, slice),
        }
    }
    declarations
}

/// Parses a style sheet into rules, in source order.
pub fn parse_css(css: &str) -> Vec<Rule> {
    let mut input = ParserInput::new(css);
    let mut input = Parser::new(&mut input);
    let mut parser = StyleSheetRuleParser;

    let mut rules = Vec::new();
    for result in StyleSheetParser::new(&mut input, &mut parser) {
        let style_rule = match result {
            Ok(r) => r,
            Err((error, slice)) => {
                warn!("CSS rule dropped: {:?}, {:?}", error, slice);
                continue;
            }
        };
        let declarations: Rc<[Declaration]> = style_rule.declarations.into();
        for selector in &style_rule.selectors {
            rules.push(Rule::new(selector, declarations.clone()));
        }
    }
    rules
}

/// The rules seen so far in a document, in the order they were declared.
#[derive(Debug, Default)]
pub struct CssEngine {
    rules: Vec<Rule>,
}

impl CssEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Appends the rules of a style sheet.
    pub fn ingest(&mut self, css: &str) {
        let rules = parse_css(css);
        debug!("Ingested {} rules", rules.len());
        self.rules.extend(rules);
    }

    /// Computes the cascade for `element`, given its ancestors from the
    /// innermost to the outermost.
    pub fn compute_style(&self, element: &ElementData, ancestors: &[&ElementData]) -> ComputedStyle {
        let mut style = ComputedStyle::default();
        for rule in &self.rules {
            if !rule.matches(element, ancestors) {
                continue;
            }
            for declaration in rule.declarations() {
                style.apply(&declaration.name, &declaration.value, rule.specificity);
            }
        }
        style
    }
}
