//! Unsupported feature registry (centralized guard)
//!
//! Python constructs the grammar does not accept. Scanning for them before
//! parsing turns a generic "Unexpected token" into a message naming the
//! feature, and reports every occurrence at once.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedFeature {
    TryStatement,
    ExceptClause,
    RaiseStatement,
    WithStatement,
    DelStatement,
    GlobalStatement,
    NonlocalStatement,
    FromImport,
    AsAlias,
    AsyncDef,
    AwaitExpr,
    YieldStatement,
    LambdaExpr,
    AssertStatement,
    Decorator,
    DictLiteral,
}

/// What a feature looks like in the token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A keyword or reserved identifier
    Word(&'static str),
    /// A character the tokenizer reports as `ERROR`
    Char(char),
}

impl UnsupportedFeature {
    pub const ALL: [UnsupportedFeature; 16] = [
        UnsupportedFeature::TryStatement,
        UnsupportedFeature::ExceptClause,
        UnsupportedFeature::RaiseStatement,
        UnsupportedFeature::WithStatement,
        UnsupportedFeature::DelStatement,
        UnsupportedFeature::GlobalStatement,
        UnsupportedFeature::NonlocalStatement,
        UnsupportedFeature::FromImport,
        UnsupportedFeature::AsAlias,
        UnsupportedFeature::AsyncDef,
        UnsupportedFeature::AwaitExpr,
        UnsupportedFeature::YieldStatement,
        UnsupportedFeature::LambdaExpr,
        UnsupportedFeature::AssertStatement,
        UnsupportedFeature::Decorator,
        UnsupportedFeature::DictLiteral,
    ];

    pub fn trigger(&self) -> Trigger {
        match self {
            UnsupportedFeature::TryStatement => Trigger::Word("try"),
            UnsupportedFeature::ExceptClause => Trigger::Word("except"),
            UnsupportedFeature::RaiseStatement => Trigger::Word("raise"),
            UnsupportedFeature::WithStatement => Trigger::Word("with"),
            UnsupportedFeature::DelStatement => Trigger::Word("del"),
            UnsupportedFeature::GlobalStatement => Trigger::Word("global"),
            UnsupportedFeature::NonlocalStatement => Trigger::Word("nonlocal"),
            UnsupportedFeature::FromImport => Trigger::Word("from"),
            UnsupportedFeature::AsAlias => Trigger::Word("as"),
            UnsupportedFeature::AsyncDef => Trigger::Word("async"),
            UnsupportedFeature::AwaitExpr => Trigger::Word("await"),
            UnsupportedFeature::YieldStatement => Trigger::Word("yield"),
            UnsupportedFeature::LambdaExpr => Trigger::Word("lambda"),
            UnsupportedFeature::AssertStatement => Trigger::Word("assert"),
            UnsupportedFeature::Decorator => Trigger::Char('@'),
            UnsupportedFeature::DictLiteral => Trigger::Char('{'),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            UnsupportedFeature::TryStatement => "try statement is unsupported",
            UnsupportedFeature::ExceptClause => "except clause is unsupported",
            UnsupportedFeature::RaiseStatement => "raise statement is unsupported",
            UnsupportedFeature::WithStatement => "with statement is unsupported",
            UnsupportedFeature::DelStatement => "del statement is unsupported",
            UnsupportedFeature::GlobalStatement => "global statement is unsupported",
            UnsupportedFeature::NonlocalStatement => "nonlocal statement is unsupported",
            UnsupportedFeature::FromImport => "from-import is unsupported",
            UnsupportedFeature::AsAlias => "import aliases are unsupported",
            UnsupportedFeature::AsyncDef => "async is unsupported",
            UnsupportedFeature::AwaitExpr => "await is unsupported",
            UnsupportedFeature::YieldStatement => "yield is unsupported",
            UnsupportedFeature::LambdaExpr => "lambda is unsupported",
            UnsupportedFeature::AssertStatement => "assert statement is unsupported",
            UnsupportedFeature::Decorator => "decorators are unsupported",
            UnsupportedFeature::DictLiteral => "dict and set literals are unsupported",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnsupportedFeatureRegistry {
    enabled: HashSet<UnsupportedFeature>,
}

impl UnsupportedFeatureRegistry {
    pub fn new(enabled: HashSet<UnsupportedFeature>) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self, feature: UnsupportedFeature) -> bool {
        self.enabled.contains(&feature)
    }

    pub fn enable(&mut self, feature: UnsupportedFeature) {
        self.enabled.insert(feature);
    }

    pub fn disable(&mut self, feature: UnsupportedFeature) {
        self.enabled.remove(&feature);
    }

    /// Enabled feature triggered by a keyword or identifier
    pub fn lookup_word(&self, word: &str) -> Option<UnsupportedFeature> {
        self.find(|trigger| matches!(trigger, Trigger::Word(w) if w == word))
    }

    /// Enabled feature triggered by a stray character
    pub fn lookup_char(&self, c: char) -> Option<UnsupportedFeature> {
        self.find(|trigger| trigger == Trigger::Char(c))
    }

    fn find(&self, pred: impl Fn(Trigger) -> bool) -> Option<UnsupportedFeature> {
        UnsupportedFeature::ALL
            .into_iter()
            .find(|f| pred(f.trigger()) && self.is_enabled(*f))
    }
}

impl Default for UnsupportedFeatureRegistry {
    fn default() -> Self {
        Self::new(UnsupportedFeature::ALL.into_iter().collect())
    }
}
