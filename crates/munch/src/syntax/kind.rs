/// Trait for token kind identifiers.
///
/// A token kind is the tag a lexer attaches to every recognized token. It is
/// usually a small `Copy` enum defined by the language that uses the lexer,
/// including one variant reserved for the end-of-input token.
///
/// The trait is implemented automatically for every type that satisfies its
/// bounds, so a plain `#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]`
/// enum is enough.
///
/// ## Example
///
/// ```rust
/// use munch::syntax::TokenKind;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MyKind {
///     Number,
///     Plus,
///     Eof,
/// }
///
/// fn takes_kind<K: TokenKind>(_kind: K) {}
/// takes_kind(MyKind::Number);
/// ```
pub trait TokenKind:
    Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
}

impl<T> TokenKind for T where
    T: Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
}
