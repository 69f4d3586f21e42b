use crate::{
    schema::EntityTypeDescriptor,
    store::{EntityRoot, NativePredicate, NativeQuery, PredicateBuilder},
};

///
/// TranslationContext
///
/// The in-flight (query, root, builder) triple threaded through one
/// request's translation. Scoped to a single execution; never
/// persisted.
///

pub struct TranslationContext<'a> {
    query: NativeQuery,
    root: EntityRoot<'a>,
    builder: PredicateBuilder,
}

impl<'a> TranslationContext<'a> {
    /// Open a context over a "select everything of this type" draft.
    #[must_use]
    pub fn new(descriptor: &'a EntityTypeDescriptor) -> Self {
        Self {
            query: NativeQuery::rows_of(descriptor),
            root: EntityRoot::new(descriptor),
            builder: PredicateBuilder::new(),
        }
    }

    #[must_use]
    pub const fn root(&self) -> &EntityRoot<'a> {
        &self.root
    }

    #[must_use]
    pub const fn builder(&self) -> &PredicateBuilder {
        &self.builder
    }

    /// Swap the draft's projection for a count aggregate.
    pub const fn select_count(&mut self) {
        self.query.select_count();
    }

    /// Attach the translated filter to the draft.
    pub fn where_filter(&mut self, predicate: NativePredicate) {
        self.query.where_filter(predicate);
    }

    /// Finish the draft into an executable native query.
    #[must_use]
    pub fn finish(self) -> NativeQuery {
        self.query
    }
}
