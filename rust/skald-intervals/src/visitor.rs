//! Query-tree visiting for term extraction and rewriting layers.

/// Role of a clause within the enclosing query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occur {
    Must,
    Should,
    MustNot,
    Filter,
}

/// Recursive visitor over a source tree.
///
/// Combinators call back with the role each sub-clause plays: difference
/// sources report their minuend as [`Occur::Must`] and their subtrahend as
/// [`Occur::MustNot`], disjunctions report sub-clauses as [`Occur::Should`].
pub trait QueryVisitor {
    fn consume_term(&mut self, field: &str, term: &str, occur: Occur);
}

/// Visitor collecting every reported term with its field and role.
#[derive(Debug, Default)]
pub struct TermCollector {
    terms: Vec<(String, String, Occur)>,
}

impl TermCollector {
    pub fn new() -> TermCollector {
        TermCollector::default()
    }

    pub fn terms(&self) -> &[(String, String, Occur)] {
        &self.terms
    }
}

impl QueryVisitor for TermCollector {
    fn consume_term(&mut self, field: &str, term: &str, occur: Occur) {
        self.terms.push((field.to_string(), term.to_string(), occur));
    }
}
