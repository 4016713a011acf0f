//! Content model particles and automata
//!
//! A complex type's element content is described by a particle tree: element
//! references and wildcards composed into sequence/choice/all groups with
//! occurrence bounds. The [`ContentAutomaton`] trait is the incremental
//! matching interface the validator drives ("is this child name valid next",
//! "is it valid to stop now"); [`ModelGroup::new_cursor`] produces a cursor
//! for a particle tree.
//!
//! Sequence and choice trees are compiled once per group into a small
//! epsilon-NFA (occurrence bounds are unrolled; `maxOccurs="unbounded"`
//! becomes a loop). `all` groups, which cannot nest, use a dedicated
//! unordered cursor.

use crate::namespaces::QName;
use once_cell::sync::{Lazy, OnceCell};
use std::fmt;
use std::sync::Arc;

use super::elements::ElementDecl;
use super::wildcards::{NamespaceConstraint, ProcessContents};

/// Occurrence bounds for a particle (minOccurs, maxOccurs).
/// `None` for max means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }

    /// One or more (1, unbounded)
    pub fn one_or_more() -> Self {
        Self { min: 1, max: None }
    }

    /// Check if this particle can be absent (minOccurs == 0)
    pub fn is_emptiable(&self) -> bool {
        self.min == 0
    }

    /// Check if an occurrence count is under the minimum
    pub fn is_missing(&self, count: u32) -> bool {
        count < self.min
    }

    /// Check if an occurrence count has reached the maximum
    pub fn is_over(&self, count: u32) -> bool {
        match self.max {
            Some(max) => count >= max,
            None => false,
        }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

/// A leaf particle of a content model
#[derive(Debug, Clone)]
pub enum Particle {
    /// Element reference
    Element {
        /// The referenced declaration; its name is the declared name
        decl: Arc<ElementDecl>,
        /// Names of substitution-group members that may stand in for the
        /// declared name, precomputed by the schema compiler
        substitutions: Vec<QName>,
    },
    /// Element wildcard (xs:any)
    Wildcard {
        /// Allowed namespaces
        namespace: NamespaceConstraint,
        /// Validation demanded for matched elements
        process: ProcessContents,
    },
}

impl Particle {
    /// Declared name, for element particles
    pub fn declared_name(&self) -> Option<&QName> {
        match self {
            Particle::Element { decl, .. } => Some(&decl.name),
            Particle::Wildcard { .. } => None,
        }
    }

    /// Check if an instance element name matches this particle
    pub fn matches(&self, name: &QName) -> bool {
        match self {
            Particle::Element { decl, substitutions } => {
                decl.name == *name || substitutions.contains(name)
            }
            Particle::Wildcard { namespace, .. } => namespace.allows(name.namespace_str()),
        }
    }
}

/// Compositor of a model group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    /// Children in declared order
    Sequence,
    /// Exactly one of the children
    Choice,
    /// Children in any order, each at most once (XSD 1.0 `all`)
    All,
}

/// One term of a model group: a leaf particle or a nested group
#[derive(Debug, Clone)]
pub enum GroupTerm {
    /// Leaf particle with its occurrence bounds
    Particle(Particle, Occurs),
    /// Nested group (carries its own occurrence bounds)
    Group(Arc<ModelGroup>),
}

impl GroupTerm {
    /// Element term occurring exactly once
    pub fn element(decl: Arc<ElementDecl>) -> Self {
        Self::element_occurs(decl, Occurs::once())
    }

    /// Element term with explicit occurrence bounds
    pub fn element_occurs(decl: Arc<ElementDecl>, occurs: Occurs) -> Self {
        GroupTerm::Particle(
            Particle::Element {
                decl,
                substitutions: Vec::new(),
            },
            occurs,
        )
    }

    /// Element term accepting substitution-group members as well
    pub fn element_with_substitutions(
        decl: Arc<ElementDecl>,
        substitutions: Vec<QName>,
        occurs: Occurs,
    ) -> Self {
        GroupTerm::Particle(Particle::Element { decl, substitutions }, occurs)
    }

    /// Wildcard term
    pub fn wildcard(
        namespace: NamespaceConstraint,
        process: ProcessContents,
        occurs: Occurs,
    ) -> Self {
        GroupTerm::Particle(Particle::Wildcard { namespace, process }, occurs)
    }

    /// Nested group term
    pub fn group(group: Arc<ModelGroup>) -> Self {
        GroupTerm::Group(group)
    }
}

/// A model group: compositor, terms and occurrence bounds
#[derive(Debug)]
pub struct ModelGroup {
    /// The compositor
    pub compositor: Compositor,
    /// The child terms, in declared order
    pub terms: Vec<GroupTerm>,
    /// Occurrence bounds of the group itself
    pub occurs: Occurs,
    nfa: OnceCell<Arc<Nfa>>,
}

impl ModelGroup {
    /// Create a group with the given compositor and default occurrence
    pub fn new(compositor: Compositor, terms: Vec<GroupTerm>) -> Self {
        Self {
            compositor,
            terms,
            occurs: Occurs::once(),
            nfa: OnceCell::new(),
        }
    }

    /// Sequence group
    pub fn sequence(terms: Vec<GroupTerm>) -> Self {
        Self::new(Compositor::Sequence, terms)
    }

    /// Choice group
    pub fn choice(terms: Vec<GroupTerm>) -> Self {
        Self::new(Compositor::Choice, terms)
    }

    /// All group
    pub fn all(terms: Vec<GroupTerm>) -> Self {
        Self::new(Compositor::All, terms)
    }

    /// Set the group's occurrence bounds
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }

    /// Create a fresh traversal cursor for this group
    pub fn new_cursor(self: &Arc<Self>) -> Box<dyn ContentAutomaton> {
        if self.compositor == Compositor::All {
            Box::new(AllCursor::new(self))
        } else {
            let nfa = self
                .nfa
                .get_or_init(|| Arc::new(Nfa::compile(self)))
                .clone();
            Box::new(NfaCursor::new(nfa))
        }
    }
}

/// Incremental content-model matcher, one per open element
pub trait ContentAutomaton: fmt::Debug {
    /// Try to accept the next child element name; on success the cursor
    /// advances and [`current_particle`](Self::current_particle) reports the
    /// matched particle
    fn try_visit(&mut self, name: &QName) -> bool;

    /// The particle matched by the last successful visit
    fn current_particle(&self) -> Option<&Particle>;

    /// Check whether stopping here satisfies the content model
    fn try_end(&self) -> bool;

    /// Element names acceptable at this position, split into
    /// (required, optional)
    fn expected_names(&self) -> (Vec<QName>, Vec<QName>);
}

// =============================================================================
// NFA compilation (sequence/choice trees)
// =============================================================================

#[derive(Debug)]
struct Nfa {
    eps: Vec<Vec<usize>>,
    trans: Vec<Vec<(usize, usize)>>,
    leaves: Vec<Particle>,
    start: usize,
    accept: usize,
}

struct NfaBuilder {
    eps: Vec<Vec<usize>>,
    trans: Vec<Vec<(usize, usize)>>,
    leaves: Vec<Particle>,
}

impl NfaBuilder {
    fn new() -> Self {
        Self {
            eps: Vec::new(),
            trans: Vec::new(),
            leaves: Vec::new(),
        }
    }

    fn state(&mut self) -> usize {
        self.eps.push(Vec::new());
        self.trans.push(Vec::new());
        self.eps.len() - 1
    }

    fn eps_edge(&mut self, from: usize, to: usize) {
        self.eps[from].push(to);
    }

    fn leaf(&mut self, particle: &Particle) -> usize {
        self.leaves.push(particle.clone());
        self.leaves.len() - 1
    }

    /// One instance of a term, ignoring its occurrence bounds
    fn compile_once(&mut self, term: &GroupTerm) -> (usize, usize) {
        match term {
            GroupTerm::Particle(particle, _) => {
                let idx = self.leaf(particle);
                let start = self.state();
                let end = self.state();
                self.trans[start].push((idx, end));
                (start, end)
            }
            GroupTerm::Group(group) => self.compile_group_once(group),
        }
    }

    /// One instance of a group body, ignoring the group's occurrence bounds
    fn compile_group_once(&mut self, group: &ModelGroup) -> (usize, usize) {
        match group.compositor {
            Compositor::Sequence => {
                let start = self.state();
                let mut cur = start;
                for term in &group.terms {
                    let (s, e) = self.compile_term(term);
                    self.eps_edge(cur, s);
                    cur = e;
                }
                (start, cur)
            }
            Compositor::Choice => {
                let start = self.state();
                let end = self.state();
                for term in &group.terms {
                    let (s, e) = self.compile_term(term);
                    self.eps_edge(start, s);
                    self.eps_edge(e, end);
                }
                if group.terms.is_empty() {
                    self.eps_edge(start, end);
                }
                (start, end)
            }
            // `all` cannot nest inside sequence/choice; treat defensively as
            // a sequence so compilation never panics
            Compositor::All => {
                let start = self.state();
                let mut cur = start;
                for term in &group.terms {
                    let (s, e) = self.compile_term(term);
                    self.eps_edge(cur, s);
                    cur = e;
                }
                (start, cur)
            }
        }
    }

    /// A term with its occurrence bounds applied
    fn compile_term(&mut self, term: &GroupTerm) -> (usize, usize) {
        let occurs = match term {
            GroupTerm::Particle(_, occurs) => *occurs,
            GroupTerm::Group(group) => group.occurs,
        };
        self.repeat(term, occurs)
    }

    /// Unroll occurrence bounds: `min` mandatory copies, then either a loop
    /// (unbounded) or `max - min` skippable copies
    fn repeat(&mut self, term: &GroupTerm, occurs: Occurs) -> (usize, usize) {
        let start = self.state();
        let mut cur = start;

        for _ in 0..occurs.min {
            let (s, e) = self.compile_once(term);
            self.eps_edge(cur, s);
            cur = e;
        }

        let end = self.state();
        match occurs.max {
            None => {
                let (s, e) = self.compile_once(term);
                self.eps_edge(cur, s);
                self.eps_edge(e, s);
                self.eps_edge(e, end);
                self.eps_edge(cur, end);
            }
            Some(max) => {
                for _ in occurs.min..max {
                    self.eps_edge(cur, end);
                    let (s, e) = self.compile_once(term);
                    self.eps_edge(cur, s);
                    cur = e;
                }
                self.eps_edge(cur, end);
            }
        }
        (start, end)
    }
}

impl Nfa {
    fn compile(group: &ModelGroup) -> Self {
        let mut builder = NfaBuilder::new();
        let start = builder.state();
        let term = GroupTerm::Group(Arc::new(ModelGroup {
            compositor: group.compositor,
            terms: group.terms.clone(),
            occurs: group.occurs,
            nfa: OnceCell::new(),
        }));
        let (s, accept) = builder.compile_term(&term);
        builder.eps_edge(start, s);
        Nfa {
            eps: builder.eps,
            trans: builder.trans,
            leaves: builder.leaves,
            start,
            accept,
        }
    }

    fn closure(&self, seed: &[usize]) -> Vec<usize> {
        let mut visited = vec![false; self.eps.len()];
        let mut stack: Vec<usize> = seed.to_vec();
        let mut result = Vec::new();
        while let Some(state) = stack.pop() {
            if visited[state] {
                continue;
            }
            visited[state] = true;
            result.push(state);
            for &next in &self.eps[state] {
                stack.push(next);
            }
        }
        result.sort_unstable();
        result
    }
}

/// NFA-backed cursor for sequence/choice particle trees
#[derive(Debug)]
pub struct NfaCursor {
    nfa: Arc<Nfa>,
    current: Vec<usize>,
    last_matched: Option<usize>,
}

impl NfaCursor {
    fn new(nfa: Arc<Nfa>) -> Self {
        let current = nfa.closure(&[nfa.start]);
        Self {
            nfa,
            current,
            last_matched: None,
        }
    }

    /// Whether the accept state is reachable from the current position
    /// without ever consuming an element of the given name
    fn completable_avoiding(&self, name: &QName) -> bool {
        let mut visited = vec![false; self.nfa.eps.len()];
        let mut stack: Vec<usize> = self.current.clone();
        while let Some(state) = stack.pop() {
            if visited[state] {
                continue;
            }
            visited[state] = true;
            if state == self.nfa.accept {
                return true;
            }
            for &next in &self.nfa.eps[state] {
                stack.push(next);
            }
            for &(leaf, target) in &self.nfa.trans[state] {
                let avoided = match &self.nfa.leaves[leaf] {
                    Particle::Element { decl, .. } => decl.name == *name,
                    Particle::Wildcard { .. } => false,
                };
                if !avoided {
                    stack.push(target);
                }
            }
        }
        false
    }
}

impl ContentAutomaton for NfaCursor {
    fn try_visit(&mut self, name: &QName) -> bool {
        let mut element_targets: Vec<usize> = Vec::new();
        let mut element_leaf = None;
        let mut wildcard_targets: Vec<usize> = Vec::new();
        let mut wildcard_leaf = None;

        for &state in &self.current {
            for &(leaf, target) in &self.nfa.trans[state] {
                let particle = &self.nfa.leaves[leaf];
                if !particle.matches(name) {
                    continue;
                }
                match particle {
                    Particle::Element { .. } => {
                        element_targets.push(target);
                        element_leaf.get_or_insert(leaf);
                    }
                    Particle::Wildcard { .. } => {
                        wildcard_targets.push(target);
                        wildcard_leaf.get_or_insert(leaf);
                    }
                }
            }
        }

        // Element particles take precedence over wildcards
        let (targets, leaf) = if element_leaf.is_some() {
            (element_targets, element_leaf)
        } else if wildcard_leaf.is_some() {
            (wildcard_targets, wildcard_leaf)
        } else {
            return false;
        };

        self.current = self.nfa.closure(&targets);
        self.last_matched = leaf;
        true
    }

    fn current_particle(&self) -> Option<&Particle> {
        self.last_matched.map(|idx| &self.nfa.leaves[idx])
    }

    fn try_end(&self) -> bool {
        self.current.binary_search(&self.nfa.accept).is_ok()
    }

    fn expected_names(&self) -> (Vec<QName>, Vec<QName>) {
        let mut required: Vec<QName> = Vec::new();
        let mut optional: Vec<QName> = Vec::new();
        for &state in &self.current {
            for &(leaf, _) in &self.nfa.trans[state] {
                if let Particle::Element { decl, .. } = &self.nfa.leaves[leaf] {
                    if required.contains(&decl.name) || optional.contains(&decl.name) {
                        continue;
                    }
                    if self.completable_avoiding(&decl.name) {
                        optional.push(decl.name.clone());
                    } else {
                        required.push(decl.name.clone());
                    }
                }
            }
        }
        (required, optional)
    }
}

// =============================================================================
// All-group cursor
// =============================================================================

/// Unordered cursor for `all` groups
#[derive(Debug)]
pub struct AllCursor {
    entries: Vec<(Particle, Occurs, u32)>,
    group_emptiable: bool,
    last_matched: Option<usize>,
}

impl AllCursor {
    fn new(group: &ModelGroup) -> Self {
        let entries = group
            .terms
            .iter()
            .filter_map(|term| match term {
                GroupTerm::Particle(particle @ Particle::Element { .. }, occurs) => {
                    Some((particle.clone(), *occurs, 0))
                }
                _ => None,
            })
            .collect();
        Self {
            entries,
            group_emptiable: group.occurs.is_emptiable(),
            last_matched: None,
        }
    }
}

impl ContentAutomaton for AllCursor {
    fn try_visit(&mut self, name: &QName) -> bool {
        for (idx, (particle, occurs, seen)) in self.entries.iter_mut().enumerate() {
            if particle.matches(name) && !occurs.is_over(*seen) {
                *seen += 1;
                self.last_matched = Some(idx);
                return true;
            }
        }
        false
    }

    fn current_particle(&self) -> Option<&Particle> {
        self.last_matched.map(|idx| &self.entries[idx].0)
    }

    fn try_end(&self) -> bool {
        if self.group_emptiable && self.entries.iter().all(|(_, _, seen)| *seen == 0) {
            return true;
        }
        self.entries
            .iter()
            .all(|(_, occurs, seen)| !occurs.is_missing(*seen))
    }

    fn expected_names(&self) -> (Vec<QName>, Vec<QName>) {
        let nothing_seen = self.entries.iter().all(|(_, _, seen)| *seen == 0);
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for (particle, occurs, seen) in &self.entries {
            let name = match particle.declared_name() {
                Some(name) => name.clone(),
                None => continue,
            };
            if occurs.is_missing(*seen) && !(self.group_emptiable && nothing_seen) {
                required.push(name);
            } else if !occurs.is_over(*seen) {
                optional.push(name);
            }
        }
        (required, optional)
    }
}

// =============================================================================
// Lax any-content cursor (xs:anyType)
// =============================================================================

static ANY_PARTICLE: Lazy<Particle> = Lazy::new(|| Particle::Wildcard {
    namespace: NamespaceConstraint::Any,
    process: ProcessContents::Lax,
});

/// Cursor accepting any child element laxly; used for xs:anyType content
#[derive(Debug, Default)]
pub struct AnyContentCursor {
    visited: bool,
}

impl AnyContentCursor {
    /// Create an any-content cursor
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentAutomaton for AnyContentCursor {
    fn try_visit(&mut self, _name: &QName) -> bool {
        self.visited = true;
        true
    }

    fn current_particle(&self) -> Option<&Particle> {
        if self.visited {
            Some(&ANY_PARTICLE)
        } else {
            None
        }
    }

    fn try_end(&self) -> bool {
        true
    }

    fn expected_names(&self) -> (Vec<QName>, Vec<QName>) {
        (Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::types::SchemaType;

    fn decl(name: &str) -> Arc<ElementDecl> {
        Arc::new(ElementDecl::new(QName::local(name), SchemaType::any_type()))
    }

    fn seq(terms: Vec<GroupTerm>) -> Arc<ModelGroup> {
        Arc::new(ModelGroup::sequence(terms))
    }

    #[test]
    fn test_sequence_in_order() {
        let group = seq(vec![GroupTerm::element(decl("a")), GroupTerm::element(decl("b"))]);
        let mut cursor = group.new_cursor();

        assert!(!cursor.try_end());
        assert!(cursor.try_visit(&QName::local("a")));
        assert!(!cursor.try_end());
        assert!(cursor.try_visit(&QName::local("b")));
        assert!(cursor.try_end());
    }

    #[test]
    fn test_sequence_rejects_out_of_order() {
        let group = seq(vec![GroupTerm::element(decl("a")), GroupTerm::element(decl("b"))]);
        let mut cursor = group.new_cursor();

        assert!(!cursor.try_visit(&QName::local("b")));
        // cursor unchanged, `a` still acceptable
        assert!(cursor.try_visit(&QName::local("a")));
    }

    #[test]
    fn test_choice() {
        let group = Arc::new(ModelGroup::choice(vec![
            GroupTerm::element(decl("a")),
            GroupTerm::element(decl("b")),
        ]));

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::local("b")));
        assert!(cursor.try_end());
        assert!(!cursor.try_visit(&QName::local("a")));
    }

    #[test]
    fn test_optional_particle() {
        let group = seq(vec![
            GroupTerm::element_occurs(decl("a"), Occurs::optional()),
            GroupTerm::element(decl("b")),
        ]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::local("b")));
        assert!(cursor.try_end());
    }

    #[test]
    fn test_unbounded_particle() {
        let group = seq(vec![GroupTerm::element_occurs(
            decl("item"),
            Occurs::zero_or_more(),
        )]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_end());
        for _ in 0..5 {
            assert!(cursor.try_visit(&QName::local("item")));
        }
        assert!(cursor.try_end());
    }

    #[test]
    fn test_bounded_max_occurs() {
        let group = seq(vec![GroupTerm::element_occurs(
            decl("item"),
            Occurs::new(1, Some(2)),
        )]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::local("item")));
        assert!(cursor.try_visit(&QName::local("item")));
        assert!(!cursor.try_visit(&QName::local("item")));
        assert!(cursor.try_end());
    }

    #[test]
    fn test_nested_groups() {
        // (a, (b | c), d)
        let inner = Arc::new(ModelGroup::choice(vec![
            GroupTerm::element(decl("b")),
            GroupTerm::element(decl("c")),
        ]));
        let group = seq(vec![
            GroupTerm::element(decl("a")),
            GroupTerm::group(inner),
            GroupTerm::element(decl("d")),
        ]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::local("a")));
        assert!(cursor.try_visit(&QName::local("c")));
        assert!(cursor.try_visit(&QName::local("d")));
        assert!(cursor.try_end());
    }

    #[test]
    fn test_expected_names_required_then_satisfied() {
        let group = seq(vec![GroupTerm::element(decl("a")), GroupTerm::element(decl("b"))]);
        let mut cursor = group.new_cursor();

        let (required, optional) = cursor.expected_names();
        assert_eq!(required, vec![QName::local("a")]);
        assert!(optional.is_empty());

        cursor.try_visit(&QName::local("a"));
        cursor.try_visit(&QName::local("b"));
        let (required, _) = cursor.expected_names();
        assert!(required.is_empty());
    }

    #[test]
    fn test_expected_names_splits_optional_from_required() {
        // (a?, b): the model completes without a, never without b
        let group = seq(vec![
            GroupTerm::element_occurs(decl("a"), Occurs::optional()),
            GroupTerm::element(decl("b")),
        ]);
        let cursor = group.new_cursor();

        let (required, optional) = cursor.expected_names();
        assert_eq!(required, vec![QName::local("b")]);
        assert_eq!(optional, vec![QName::local("a")]);
    }

    #[test]
    fn test_expected_names_choice_members_optional() {
        // (a | b): either alternative completes the model without the other
        let group = Arc::new(ModelGroup::choice(vec![
            GroupTerm::element(decl("a")),
            GroupTerm::element(decl("b")),
        ]));
        let cursor = group.new_cursor();

        let (required, mut optional) = cursor.expected_names();
        assert!(required.is_empty());
        optional.sort_by(|a, b| a.local_name.cmp(&b.local_name));
        assert_eq!(optional, vec![QName::local("a"), QName::local("b")]);
    }

    #[test]
    fn test_substitution_member_matches() {
        let head = decl("shape");
        let group = seq(vec![GroupTerm::element_with_substitutions(
            head,
            vec![QName::local("circle"), QName::local("square")],
            Occurs::once(),
        )]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::local("circle")));
        match cursor.current_particle() {
            Some(Particle::Element { decl, .. }) => assert_eq!(decl.name, QName::local("shape")),
            other => panic!("unexpected particle: {:?}", other),
        }
    }

    #[test]
    fn test_wildcard_particle() {
        let group = seq(vec![GroupTerm::wildcard(
            NamespaceConstraint::of(["http://ok"]),
            ProcessContents::Lax,
            Occurs::zero_or_more(),
        )]);

        let mut cursor = group.new_cursor();
        assert!(cursor.try_visit(&QName::namespaced("http://ok", "x")));
        assert!(!cursor.try_visit(&QName::namespaced("http://nope", "x")));
        assert!(cursor.try_end());
    }

    #[test]
    fn test_all_group_any_order() {
        let group = Arc::new(ModelGroup::all(vec![
            GroupTerm::element(decl("a")),
            GroupTerm::element(decl("b")),
        ]));

        let mut cursor = group.new_cursor();
        assert!(!cursor.try_end());
        assert!(cursor.try_visit(&QName::local("b")));
        let (required, _) = cursor.expected_names();
        assert_eq!(required, vec![QName::local("a")]);
        assert!(cursor.try_visit(&QName::local("a")));
        assert!(cursor.try_end());
        assert!(!cursor.try_visit(&QName::local("a")));
    }

    #[test]
    fn test_any_content_cursor() {
        let mut cursor = AnyContentCursor::new();
        assert!(cursor.try_end());
        assert!(cursor.try_visit(&QName::local("whatever")));
        assert!(matches!(
            cursor.current_particle(),
            Some(Particle::Wildcard { .. })
        ));
        assert!(cursor.try_end());
    }
}
