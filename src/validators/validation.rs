//! Streaming instance validation
//!
//! [`StreamValidator`] consumes the tokenized event stream and validates it
//! against a compiled schema. An explicit stack of per-element states stands
//! in for the recursion of a tree-walking validator; after any error the
//! offending subtree is skipped by depth counting and validation resumes at
//! its end.

use crate::error::{ErrorSink, Reporter, ValidationError};
use crate::events::{EventKind, EventResolver, ValidationEvent};
use crate::locations::Location;
use crate::namespaces::QName;
use crate::XSI_NAMESPACE;
use std::sync::Arc;

use super::attributes::{AttributeDecl, AttributeUse};
use super::builtins::{validate_builtin, BuiltinKind, XsdValue};
use super::elements::FieldRef;
use super::facets::WhiteSpace;
use super::globals::SchemaRegistry;
use super::identities::{IdentityHandler, NoopIdentityHandler};
use super::particles::Particle;
use super::simple_types::{validate_simple_value, SimpleTypeDef};
use super::state::ValidationState;
use super::types::SchemaType;
use super::wildcards::ProcessContents;

/// Push-based validator over a stream of document events
pub struct StreamValidator {
    registry: Arc<dyn SchemaRegistry>,
    root_type: Arc<SchemaType>,
    root_field: Option<FieldRef>,
    stack: Vec<ValidationState>,
    skip_depth: u32,
    reporter: Reporter,
    identity: Box<dyn IdentityHandler>,
}

impl StreamValidator {
    /// Validator for a document whose root is governed by `root_type`
    pub fn new(
        registry: Arc<dyn SchemaRegistry>,
        root_type: Arc<SchemaType>,
        sink: Box<dyn ErrorSink>,
    ) -> Self {
        Self {
            registry,
            root_type,
            root_field: None,
            stack: Vec::new(),
            skip_depth: 0,
            reporter: Reporter::new(sink),
            identity: Box::new(NoopIdentityHandler),
        }
    }

    /// Validator rooted at a global element declaration
    pub fn for_element(
        registry: Arc<dyn SchemaRegistry>,
        decl: Arc<super::elements::ElementDecl>,
        sink: Box<dyn ErrorSink>,
    ) -> Self {
        let root_type = decl.element_type.clone();
        Self::new(registry, root_type, sink).with_root_field(FieldRef::Element(decl))
    }

    /// Attach the declaration governing the root element
    pub fn with_root_field(mut self, field: FieldRef) -> Self {
        self.root_field = Some(field);
        self
    }

    /// Attach an identity constraint engine
    pub fn with_identity_handler(mut self, handler: Box<dyn IdentityHandler>) -> Self {
        self.identity = handler;
        self
    }

    /// Whether no violation has been observed so far
    pub fn is_valid(&self) -> bool {
        !self.reporter.invalid() && self.identity.is_valid()
    }

    /// Monotonic count of error diagnostics, including suspended trials
    pub fn error_count(&self) -> u64 {
        self.reporter.error_count()
    }

    /// Push the next document event
    pub fn next_event(&mut self, kind: EventKind, event: &dyn ValidationEvent) {
        match kind {
            EventKind::Begin => self.begin(event),
            EventKind::Attr => self.attr(event),
            EventKind::EndAttrs => self.end_attrs(event),
            EventKind::Text => self.text(event),
            EventKind::End => self.end(event),
        }
    }

    // =========================================================================
    // BEGIN
    // =========================================================================

    fn begin(&mut self, event: &dyn ValidationEvent) {
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return;
        }
        let location = event.location();
        let name = match event.name() {
            Some(name) => name.clone(),
            None => {
                self.reporter.report(
                    ValidationError::new("element start without a name").with_location(location),
                );
                return;
            }
        };

        let resolved = if self.stack.is_empty() {
            Some((self.root_type.clone(), self.root_field.clone()))
        } else {
            self.resolve_child(&name, &location)
        };
        let (declared_type, field) = match resolved {
            Some(pair) => pair,
            None => return,
        };

        if declared_type.no_type {
            self.reporter.report(
                ValidationError::new(format!("element '{}' has no type definition", name))
                    .with_location(location),
            );
            self.skip_depth = 1;
            return;
        }

        if let Some(FieldRef::Element(decl)) = &field {
            if decl.is_abstract {
                self.reporter.report(
                    ValidationError::new(format!(
                        "abstract element '{}' cannot appear in an instance",
                        name
                    ))
                    .with_location(location),
                );
                self.skip_depth = 1;
                return;
            }
        }

        let effective = match self.effective_type(event, &declared_type, &field, &location) {
            Some(effective) => effective,
            None => return,
        };

        if effective.is_abstract {
            self.reporter.report(
                ValidationError::new(format!(
                    "abstract type {} cannot validate element '{}'",
                    effective.display_name(),
                    name
                ))
                .with_location(location),
            );
            self.skip_depth = 1;
            return;
        }

        let is_nil = self.check_nil(event, &field, &location);

        let constraints = match &field {
            Some(FieldRef::Element(decl)) => decl.identity_constraints.clone(),
            _ => Vec::new(),
        };
        self.identity.on_element_begin(event, &effective, &constraints);
        self.stack.push(ValidationState::new(effective, field, is_nil));
    }

    /// Match a child element against the parent's content model and resolve
    /// its declared type. Reports and enters skip mode on failure.
    fn resolve_child(
        &mut self,
        name: &QName,
        location: &Location,
    ) -> Option<(Arc<SchemaType>, Option<FieldRef>)> {
        let matched: Particle = {
            let parent = self.stack.last_mut()?;
            if parent.is_nil {
                self.reporter.report(
                    ValidationError::new(format!(
                        "element '{}' is not allowed inside a nil element",
                        name
                    ))
                    .with_location(location.clone()),
                );
                self.skip_depth = 1;
                return None;
            }
            let cursor = match parent.cursor.as_mut() {
                Some(cursor) if parent.can_have_elements => cursor,
                _ => {
                    self.reporter.report(
                        ValidationError::new(format!(
                            "element '{}' is not allowed: the content of {} has no child elements",
                            name,
                            parent.schema_type.display_name()
                        ))
                        .with_location(location.clone()),
                    );
                    self.skip_depth = 1;
                    return None;
                }
            };
            if !cursor.try_visit(name) {
                let (required, optional) = cursor.expected_names();
                let reason = if !required.is_empty() {
                    format!("expected: {}", join_names(&required))
                } else if !optional.is_empty() {
                    format!("allowed: {}", join_names(&optional))
                } else {
                    "no further elements are allowed".to_string()
                };
                self.reporter.report(
                    ValidationError::new(format!("element '{}' is not allowed here", name))
                        .with_reason(reason)
                        .with_location(location.clone()),
                );
                self.skip_depth = 1;
                return None;
            }
            parent.is_empty = false;
            parent.cursor.as_ref().and_then(|c| c.current_particle().cloned())?
        };

        match matched {
            Particle::Element { decl, .. } => {
                if decl.name == *name {
                    Some((decl.element_type.clone(), Some(FieldRef::Element(decl))))
                } else {
                    // substitution group member stood in for the head
                    if decl.block.substitution {
                        self.reporter.report(
                            ValidationError::new(format!(
                                "substitution of element '{}' for '{}' is blocked",
                                name, decl.name
                            ))
                            .with_location(location.clone()),
                        );
                        self.skip_depth = 1;
                        return None;
                    }
                    match self.registry.global_element(name) {
                        Some(member) => {
                            Some((member.element_type.clone(), Some(FieldRef::Element(member))))
                        }
                        None => {
                            self.reporter.report(
                                ValidationError::new(format!(
                                    "substituting element '{}' has no global declaration",
                                    name
                                ))
                                .with_location(location.clone()),
                            );
                            self.skip_depth = 1;
                            None
                        }
                    }
                }
            }
            Particle::Wildcard { process, .. } => match process {
                ProcessContents::Skip => {
                    self.skip_depth = 1;
                    None
                }
                ProcessContents::Strict => match self.registry.global_element(name) {
                    Some(decl) => Some((decl.element_type.clone(), Some(FieldRef::Element(decl)))),
                    None => {
                        self.reporter.report(
                            ValidationError::new(format!(
                                "no global declaration found for strictly validated element '{}'",
                                name
                            ))
                            .with_location(location.clone()),
                        );
                        self.skip_depth = 1;
                        None
                    }
                },
                ProcessContents::Lax => match self.registry.global_element(name) {
                    Some(decl) => Some((decl.element_type.clone(), Some(FieldRef::Element(decl)))),
                    None => Some((SchemaType::any_type(), None)),
                },
            },
        }
    }

    /// Apply a xsi:type override, checking resolvability, assignability and
    /// blocked derivations. None means skip mode was entered.
    fn effective_type(
        &mut self,
        event: &dyn ValidationEvent,
        declared: &Arc<SchemaType>,
        field: &Option<FieldRef>,
        location: &Location,
    ) -> Option<Arc<SchemaType>> {
        let raw = match event.xsi_type() {
            Some(raw) => raw,
            None => return Some(declared.clone()),
        };
        let lexical = WhiteSpace::Collapse.normalize(raw);

        let resolver = EventResolver(event);
        let before = self.reporter.error_count();
        self.reporter.suspend();
        let parsed = validate_builtin(
            BuiltinKind::QName,
            &lexical,
            &resolver,
            &mut self.reporter,
            location,
        );
        self.reporter.resume();

        let type_name = match parsed {
            Some(XsdValue::QName(type_name)) if self.reporter.error_count() == before => type_name,
            _ => {
                self.reporter.report(
                    ValidationError::new(format!("invalid xsi:type value '{}'", raw))
                        .with_location(location.clone()),
                );
                return Some(declared.clone());
            }
        };

        let override_type = match self.registry.global_type(&type_name) {
            Some(override_type) => override_type,
            None => {
                self.reporter.report(
                    ValidationError::new(format!(
                        "xsi:type names the unknown type {}",
                        type_name
                    ))
                    .with_location(location.clone()),
                );
                return Some(declared.clone());
            }
        };

        if SchemaType::same_type(&override_type, declared) {
            return Some(override_type);
        }
        if !SchemaType::is_derived_from(&override_type, declared) {
            self.reporter.report(
                ValidationError::new(format!(
                    "type {} is not derived from the declared type {}",
                    override_type.display_name(),
                    declared.display_name()
                ))
                .with_location(location.clone()),
            );
            self.skip_depth = 1;
            return None;
        }
        let block = declared.block | field.as_ref().map(|f| f.block()).unwrap_or_default();
        if let Some(method) = SchemaType::blocked_derivation(&override_type, declared, block) {
            self.reporter.report(
                ValidationError::new(format!(
                    "substituting type {} is blocked: derivation by {} is not allowed here",
                    override_type.display_name(),
                    method
                ))
                .with_location(location.clone()),
            );
            self.skip_depth = 1;
            return None;
        }
        Some(override_type)
    }

    /// Parse xsi:nil, checking the declaration is nillable
    fn check_nil(
        &mut self,
        event: &dyn ValidationEvent,
        field: &Option<FieldRef>,
        location: &Location,
    ) -> bool {
        let raw = match event.xsi_nil() {
            Some(raw) => raw,
            None => return false,
        };
        match WhiteSpace::Collapse.normalize(raw).as_str() {
            "true" | "1" => {
                if !field.as_ref().map(|f| f.nillable()).unwrap_or(false) {
                    self.reporter.report(
                        ValidationError::new("xsi:nil on an element that is not nillable")
                            .with_location(location.clone()),
                    );
                    return false;
                }
                if field.as_ref().and_then(|f| f.fixed_value()).is_some() {
                    self.reporter.report(
                        ValidationError::new(
                            "a nil element cannot satisfy its fixed value constraint",
                        )
                        .with_location(location.clone()),
                    );
                }
                true
            }
            "false" | "0" => false,
            _ => {
                self.reporter.report(
                    ValidationError::new(format!("'{}' is not a valid xsi:nil value", raw))
                        .with_location(location.clone()),
                );
                false
            }
        }
    }

    // =========================================================================
    // ATTR / ENDATTRS
    // =========================================================================

    fn attr(&mut self, event: &dyn ValidationEvent) {
        if self.skip_depth > 0 {
            return;
        }
        let location = event.location();
        let name = match event.name() {
            Some(name) => name.clone(),
            None => {
                self.reporter.report(
                    ValidationError::new("attribute event without a name").with_location(location),
                );
                return;
            }
        };

        let (can_have_attrs, model, type_name) = {
            let state = match self.stack.last_mut() {
                Some(state) => state,
                None => {
                    self.reporter.report(
                        ValidationError::new(format!(
                            "attribute '{}' outside any element",
                            name
                        ))
                        .with_location(location),
                    );
                    return;
                }
            };
            // duplicates are rejected before anything else
            if !state.seen_attributes.insert(name.clone()) {
                self.reporter.report(
                    ValidationError::new(format!("duplicate attribute '{}'", name))
                        .with_location(location),
                );
                return;
            }
            (
                state.can_have_attrs,
                state.attributes.clone(),
                state.schema_type.display_name(),
            )
        };

        // xsi:* attributes were consumed with the BEGIN event
        if name.namespace_str() == XSI_NAMESPACE {
            return;
        }

        if !can_have_attrs {
            self.reporter.report(
                ValidationError::new(format!(
                    "attribute '{}' is not allowed: {} carries no attributes",
                    name, type_name
                ))
                .with_location(location),
            );
            return;
        }
        let model = match model {
            Some(model) => model,
            None => return,
        };

        if let Some(decl) = model.lookup(&name) {
            self.validate_attribute(event, &name, decl, &location);
            return;
        }

        match (model.wildcard_namespace(), model.wildcard_process()) {
            (Some(namespace), Some(process)) => {
                if !namespace.allows(name.namespace_str()) {
                    self.reporter.report(
                        ValidationError::new(format!(
                            "attribute '{}' is not allowed by the attribute wildcard",
                            name
                        ))
                        .with_location(location),
                    );
                    return;
                }
                match process {
                    ProcessContents::Skip => {}
                    ProcessContents::Lax => {
                        if let Some(decl) = self.registry.global_attribute(&name) {
                            self.validate_attribute(event, &name, decl, &location);
                        }
                    }
                    ProcessContents::Strict => match self.registry.global_attribute(&name) {
                        Some(decl) => self.validate_attribute(event, &name, decl, &location),
                        None => {
                            self.reporter.report(
                                ValidationError::new(format!(
                                    "no global declaration found for strictly validated \
                                     attribute '{}'",
                                    name
                                ))
                                .with_location(location),
                            );
                        }
                    },
                }
            }
            _ => {
                self.reporter.report(
                    ValidationError::new(format!(
                        "attribute '{}' is not declared for {}",
                        name, type_name
                    ))
                    .with_location(location),
                );
            }
        }
    }

    fn validate_attribute(
        &mut self,
        event: &dyn ValidationEvent,
        name: &QName,
        decl: Arc<AttributeDecl>,
        location: &Location,
    ) {
        if decl.use_mode == AttributeUse::Prohibited {
            self.reporter.report(
                ValidationError::new(format!("attribute '{}' is prohibited", name))
                    .with_location(location.clone()),
            );
            return;
        }
        let raw = event.text().unwrap_or("");
        let field = FieldRef::Attribute(decl.clone());
        let resolver = EventResolver(event);
        let value = validate_simple_value(
            &decl.attr_type,
            Some(&field),
            raw,
            &resolver,
            location,
            &mut self.reporter,
        );
        self.identity
            .on_attribute(event, name, &decl.attr_type, value.as_ref());
    }

    fn end_attrs(&mut self, event: &dyn ValidationEvent) {
        if self.skip_depth > 0 {
            return;
        }
        let location = event.location();
        let (model, seen) = match self.stack.last() {
            Some(state) => (state.attributes.clone(), state.seen_attributes.clone()),
            None => {
                self.reporter.report(
                    ValidationError::new("attribute boundary outside any element")
                        .with_location(location),
                );
                return;
            }
        };
        let model = match model {
            Some(model) => model,
            None => return,
        };

        for decl in model.declarations() {
            if seen.contains(&decl.name) {
                continue;
            }
            match decl.use_mode {
                AttributeUse::Required => {
                    self.reporter.report(
                        ValidationError::new(format!(
                            "required attribute '{}' is missing",
                            decl.name
                        ))
                        .with_location(location.clone()),
                    );
                }
                AttributeUse::Prohibited => {}
                AttributeUse::Optional => {
                    // absent attributes with a value constraint surface as
                    // the declared lexical, already schema-validated
                    if let Some(lexical) = decl.absent_value() {
                        let value = XsdValue::String(WhiteSpace::Collapse.normalize(lexical));
                        self.identity
                            .on_attribute(event, &decl.name, &decl.attr_type, Some(&value));
                    }
                }
            }
        }
    }

    // =========================================================================
    // TEXT / END
    // =========================================================================

    fn text(&mut self, event: &dyn ValidationEvent) {
        if self.skip_depth > 0 {
            return;
        }
        let location = event.location();

        let snapshot = {
            let state = match self.stack.last_mut() {
                Some(state) => state,
                None => {
                    self.reporter.report(
                        ValidationError::new("character content outside any element")
                            .with_location(location),
                    );
                    return;
                }
            };
            if state.is_nil {
                self.reporter.report(
                    ValidationError::new("character content is not allowed in a nil element")
                        .with_location(location),
                );
                return;
            }
            state.is_empty = false;
            state.saw_text = true;
            ContentSnapshot::of(state)
        };

        let raw = event.text().unwrap_or("").to_string();
        self.handle_text(event, &raw, false, snapshot, &location);
    }

    fn end(&mut self, event: &dyn ValidationEvent) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }
        let location = event.location();
        let state = match self.stack.pop() {
            Some(state) => state,
            None => {
                self.reporter.report(
                    ValidationError::new("element end without an open element")
                        .with_location(location),
                );
                return;
            }
        };

        if !state.is_nil {
            if let Some(cursor) = &state.cursor {
                if !cursor.try_end() {
                    let (required, optional) = cursor.expected_names();
                    let mut diagnostic = ValidationError::new(format!(
                        "element content of {} is incomplete",
                        state.schema_type.display_name()
                    ))
                    .with_location(location.clone());
                    if !required.is_empty() {
                        diagnostic = diagnostic
                            .with_reason(format!("expected: {}", join_names(&required)));
                    } else if !optional.is_empty() {
                        // remaining need is a choice, no single name is forced
                        diagnostic = diagnostic
                            .with_reason(format!("expected one of: {}", join_names(&optional)));
                    }
                    self.reporter.report(diagnostic);
                }
            }
            if state.is_empty {
                // empty content still goes through value validation so that
                // default/fixed substitution and required-content checks run
                let snapshot = ContentSnapshot::of(&state);
                self.handle_text(event, "", true, snapshot, &location);
            }
        }

        self.identity.on_element_end(event);
    }

    fn handle_text(
        &mut self,
        event: &dyn ValidationEvent,
        raw: &str,
        synthesized_empty: bool,
        snapshot: ContentSnapshot,
        location: &Location,
    ) {
        if let Some(def) = &snapshot.simple_def {
            let resolver = EventResolver(event);
            let value = validate_simple_value(
                def,
                snapshot.field.as_ref(),
                raw,
                &resolver,
                location,
                &mut self.reporter,
            );
            self.identity
                .on_text(event, Some(def.as_ref()), value.as_ref(), synthesized_empty);
        } else if snapshot.mixed {
            // mixed content is unconstrained text, except for a fixed value
            // constraint on the declaration
            if snapshot
                .field
                .as_ref()
                .and_then(|f| f.fixed_value())
                .is_some()
            {
                let def = SimpleTypeDef::string_def();
                let resolver = EventResolver(event);
                let _ = validate_simple_value(
                    &def,
                    snapshot.field.as_ref(),
                    raw,
                    &resolver,
                    location,
                    &mut self.reporter,
                );
            }
            self.identity.on_text(event, None, None, synthesized_empty);
        } else {
            if !synthesized_empty && !event.is_whitespace() {
                let owner = snapshot
                    .field
                    .as_ref()
                    .map(|f| f.name().to_string())
                    .unwrap_or_else(|| snapshot.type_name.clone());
                self.reporter.report(
                    ValidationError::new(format!(
                        "non-whitespace text is not allowed in '{}'",
                        owner
                    ))
                    .with_location(location.clone()),
                );
            }
            self.identity.on_text(event, None, None, synthesized_empty);
        }
    }
}

/// Content-handling facts copied out of a state so the stack borrow can end
struct ContentSnapshot {
    simple_def: Option<Arc<SimpleTypeDef>>,
    mixed: bool,
    field: Option<FieldRef>,
    type_name: String,
}

impl ContentSnapshot {
    fn of(state: &ValidationState) -> Self {
        Self {
            simple_def: state.schema_type.simple_content_def(),
            mixed: state.can_have_mixed_content,
            field: state.field.clone(),
            type_name: state.schema_type.display_name(),
        }
    }
}

fn join_names(names: &[QName]) -> String {
    names
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
