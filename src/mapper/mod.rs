//! # Mapper
//!
//! Orchestrates one mapping call:
//!
//! 1. Look the destination type up in the `TypeCatalog`
//! 2. Normalize the input into a `RawRecord` through the `HydratorFactory`
//! 3. Fetch (or resolve and cache) the per-property directives for the
//!    (source type, destination type) pair
//! 4. Populate the destination property by property, in declaration order
//!
//! The mapper owns its collaborators behind `Arc`s; nothing is process-global.
//! Build one with `Mapper::new()` or `Mapper::builder()` and share it.
//!
//! ```rust
//! use automap_core::mapper::Mapper;
//! use automap_core::mapping::{PropertyMapping, TypeDescriptor};
//! use serde_json::json;
//!
//! let mapper = Mapper::new();
//! mapper.register_type(
//!     TypeDescriptor::builder("Person")
//!         .properties(["firstName", "lastName"])
//!         .mapped("nickname", PropertyMapping::new().with_default(json!("none")))
//!         .build(),
//! );
//!
//! let person = mapper
//!     .map(&json!({"first_name": "Ada", "last_name": "Lovelace"}).into(), "Person")
//!     .unwrap();
//! assert_eq!(person.to_value(), json!({
//!     "firstName": "Ada",
//!     "lastName": "Lovelace",
//!     "nickname": "none"
//! }));
//! ```

mod catalog;
mod mapped;
mod resolution;

pub use catalog::TypeCatalog;
pub use mapped::MappedObject;

use crate::config::MapperConfig;
use crate::error::{ConfigurationError, MappingError, MappingResult, TransformError};
use crate::hydration::{Hydrator, HydratorFactory};
use crate::input::{Input, RawRecord};
use crate::logging::log_mapping_operation;
use crate::mapping::{
    Mappable, MappingCache, MappingStorage, PropertyMapping, ResolvedConfiguration, SourceType,
    TypeDescriptor, TypePairKey,
};
use crate::naming::{ConventionMatcher, NamingConvention};
use crate::transform::{TransformContext, ValueTransformer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Object-to-object mapping engine.
#[derive(Debug, Clone)]
pub struct Mapper {
    factory: Arc<HydratorFactory>,
    storage: Arc<MappingStorage>,
    cache: Arc<MappingCache>,
    matcher: Arc<ConventionMatcher>,
    catalog: Arc<TypeCatalog>,
    config: MapperConfig,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Mapper with the default configuration, strategies and conventions.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(MapperConfig::default(), HydratorFactory::with_defaults())
    }

    pub fn builder() -> MapperBuilder {
        MapperBuilder::default()
    }

    /// Mapper with a validated configuration.
    pub fn with_config(config: MapperConfig) -> Result<Self, ConfigurationError> {
        Self::builder().config(config).build()
    }

    fn from_parts(config: MapperConfig, factory: HydratorFactory) -> Self {
        Self {
            factory: Arc::new(factory),
            storage: Arc::new(MappingStorage::new()),
            cache: Arc::new(MappingCache::new()),
            matcher: Arc::new(ConventionMatcher::new(config.min_confidence)),
            catalog: Arc::new(TypeCatalog::new()),
            config,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn factory(&self) -> &HydratorFactory {
        &self.factory
    }

    pub fn storage(&self) -> &MappingStorage {
        &self.storage
    }

    pub fn cache(&self) -> &MappingCache {
        &self.cache
    }

    pub fn matcher(&self) -> &ConventionMatcher {
        &self.matcher
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Register a destination type and feed its directives into storage.
    ///
    /// Re-registering a type replaces its directives (wildcard and concrete)
    /// and clears the resolution cache.
    pub fn register_type(&self, descriptor: TypeDescriptor) {
        if self.catalog.contains(descriptor.name()) {
            let removed = self.storage.remove_destination(descriptor.name());
            debug!(destination = descriptor.name(), removed, "Replacing directives of re-registered type");
        }
        for directive in descriptor.directives() {
            self.storage.add_property_mapping(
                &directive.source_type,
                descriptor.name(),
                &directive.property,
                directive.mapping.clone(),
            );
        }
        if self.catalog.register(descriptor).is_some() {
            self.cache.clear();
        }
    }

    pub fn register<T: Mappable>(&self) {
        self.register_type(T::descriptor());
    }

    /// Declare a directive outside a type descriptor, typically for one
    /// concrete source type. Clears the resolution cache.
    pub fn add_property_mapping(
        &self,
        source_type: &str,
        destination_type: &str,
        property: &str,
        mapping: PropertyMapping,
    ) {
        self.storage
            .add_property_mapping(source_type, destination_type, property, mapping);
        self.cache.clear();
    }

    pub fn register_hydrator(&self, hydrator: Arc<dyn Hydrator>) {
        self.factory.register(hydrator);
        self.cache.clear();
    }

    pub fn register_convention(&self, convention: Arc<dyn NamingConvention>) {
        self.matcher.register(convention);
        self.cache.clear();
    }

    /// Map `input` into a new instance of `destination`.
    #[instrument(skip(self, input), fields(source = %input.type_label()))]
    pub fn map(&self, input: &Input, destination: &str) -> MappingResult<MappedObject> {
        self.map_at_depth(input, destination, 0)
    }

    /// Map `input` onto an existing instance. Properties the input does not
    /// provide (and that have no default) keep their current values.
    #[instrument(skip(self, input, target), fields(source = %input.type_label(), destination = %target.type_name()))]
    pub fn map_to(&self, input: &Input, target: &mut MappedObject) -> MappingResult<()> {
        let destination = target.type_name().to_string();
        self.populate_at_depth(input, &destination, target, 0)
    }

    /// Map every input, in order. Fails on the first element that fails.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub fn map_array(&self, inputs: &[Input], destination: &str) -> MappingResult<Vec<MappedObject>> {
        let mapped = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                self.map_at_depth(input, destination, 0)
                    .map_err(|cause| MappingError::ElementFailed {
                        index,
                        destination: destination.to_string(),
                        cause: Box::new(cause),
                    })
            })
            .collect::<MappingResult<Vec<_>>>();

        match &mapped {
            Ok(objects) => {
                let details = format!("{} elements", objects.len());
                log_mapping_operation("map_array", "array", destination, "success", Some(&details));
            }
            Err(error) => {
                let details = error.to_string();
                log_mapping_operation("map_array", "array", destination, "failed", Some(&details));
            }
        }
        mapped
    }

    /// Map every input, in order, keeping each element's own outcome.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub fn map_array_partial(
        &self,
        inputs: &[Input],
        destination: &str,
    ) -> Vec<MappingResult<MappedObject>> {
        let results: Vec<_> = inputs
            .iter()
            .map(|input| self.map_at_depth(input, destination, 0))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        let details = format!("{} elements, {} failed", results.len(), failed);
        let status = if failed == 0 { "success" } else { "partial" };
        log_mapping_operation("map_array_partial", "array", destination, status, Some(&details));
        results
    }

    /// Map into a serde type that describes itself through `Mappable`.
    /// The type is registered on first use.
    pub fn map_into<T>(&self, input: &Input) -> MappingResult<T>
    where
        T: Mappable + DeserializeOwned,
    {
        let destination = self.ensure_registered::<T>();
        let mapped = self.map(input, &destination)?;
        serde_json::from_value(mapped.into_value()).map_err(|e| MappingError::TypedConversion {
            type_name: destination,
            reason: e.to_string(),
        })
    }

    /// Partial update of a serde value.
    pub fn map_onto<T>(&self, input: &Input, target: &mut T) -> MappingResult<()>
    where
        T: Mappable + Serialize + DeserializeOwned,
    {
        let destination = self.ensure_registered::<T>();
        let current = serde_json::to_value(&*target).map_err(|e| MappingError::TypedConversion {
            type_name: destination.clone(),
            reason: e.to_string(),
        })?;
        let Value::Object(current) = current else {
            return Err(MappingError::TypedConversion {
                type_name: destination,
                reason: "value does not serialize to an object".to_string(),
            });
        };

        let mut object = MappedObject::with_properties(&destination, current.into_iter().collect());
        self.map_to(input, &mut object)?;
        *target = serde_json::from_value(object.into_value()).map_err(|e| {
            MappingError::TypedConversion {
                type_name: destination,
                reason: e.to_string(),
            }
        })?;
        Ok(())
    }

    fn ensure_registered<T: Mappable>(&self) -> String {
        let descriptor = T::descriptor();
        let name = descriptor.name().to_string();
        if !self.catalog.contains(&name) {
            self.register_type(descriptor);
        }
        name
    }

    /// The resolved directives `input` would be mapped with. Uses and fills
    /// the cache like a regular mapping call.
    pub fn resolve_configuration(
        &self,
        input: &Input,
        destination: &str,
    ) -> MappingResult<Arc<ResolvedConfiguration>> {
        let descriptor = self.descriptor(destination)?;
        let record = self
            .factory
            .extract_at(input, destination, 0, self.config.max_depth)?;
        let source = SourceType::of(input, &record);
        Ok(self.configuration_for(&source, &record, &descriptor))
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Restore default strategies and conventions and drop every registered
    /// type, directive and cached configuration.
    pub fn reset_to_defaults(&self) {
        self.factory.reset_to_defaults();
        self.matcher.reset_to_defaults();
        self.storage.clear();
        self.catalog.clear();
        self.cache.clear();
        debug!("Mapper reset to defaults");
    }

    pub(crate) fn map_at_depth(
        &self,
        input: &Input,
        destination: &str,
        depth: usize,
    ) -> MappingResult<MappedObject> {
        let mut target = MappedObject::new(destination);
        self.populate_at_depth(input, destination, &mut target, depth)?;
        Ok(target)
    }

    fn populate_at_depth(
        &self,
        input: &Input,
        destination: &str,
        target: &mut MappedObject,
        depth: usize,
    ) -> MappingResult<()> {
        if depth > self.config.max_depth {
            return Err(MappingError::CyclicGraphDetected {
                type_name: destination.to_string(),
                depth,
                max_depth: self.config.max_depth,
            });
        }

        let descriptor = self.descriptor(destination)?;
        let record = self
            .factory
            .extract_at(input, destination, depth, self.config.max_depth)?;
        let source = SourceType::of(input, &record);
        let configuration = self.configuration_for(&source, &record, &descriptor);

        trace!(
            source = %source.cache_id(),
            destination,
            depth,
            properties = configuration.len(),
            "Populating destination"
        );
        self.populate(&configuration, &record, target, depth)
    }

    fn descriptor(&self, destination: &str) -> MappingResult<Arc<TypeDescriptor>> {
        self.catalog
            .get(destination)
            .ok_or_else(|| MappingError::DestinationTypeNotFound {
                type_name: destination.to_string(),
            })
    }

    fn configuration_for(
        &self,
        source: &SourceType,
        record: &RawRecord,
        descriptor: &TypeDescriptor,
    ) -> Arc<ResolvedConfiguration> {
        if !self.config.cache_enabled {
            return Arc::new(self.resolve(source, record, descriptor));
        }

        let key = TypePairKey::new(source.cache_id(), descriptor.name());
        if let Some(cached) = self.cache.get(&key) {
            trace!(pair = %key, "Resolution cache hit");
            return cached;
        }

        debug!(pair = %key, "Resolution cache miss, resolving");
        let resolved = Arc::new(self.resolve(source, record, descriptor));
        self.cache.put(key, Arc::clone(&resolved));
        resolved
    }

    fn resolve(
        &self,
        source: &SourceType,
        record: &RawRecord,
        descriptor: &TypeDescriptor,
    ) -> ResolvedConfiguration {
        resolution::resolve_properties(&self.storage, &self.matcher, source, record, descriptor)
    }

    fn populate(
        &self,
        configuration: &ResolvedConfiguration,
        record: &RawRecord,
        target: &mut MappedObject,
        depth: usize,
    ) -> MappingResult<()> {
        let destination = configuration.key().destination.as_str();

        for (property, resolved) in configuration.iter() {
            let mapping = &resolved.mapping;
            if mapping.is_ignored() {
                trace!(property = %property, "Ignored");
                continue;
            }

            let mut raw = mapping
                .effective_source_key()
                .and_then(|key| record.get(key))
                .cloned();
            if let Some(condition) = mapping.condition() {
                if raw.is_some() && !condition.evaluate(record) {
                    trace!(property = %property, condition = condition.name(), "Condition false, treating as absent");
                    raw = None;
                }
            }

            match (raw, mapping.default_value()) {
                (Some(value), _) => {
                    let value = match mapping.transformer() {
                        Some(transformer) => self.apply_transformer(
                            transformer.as_ref(),
                            value,
                            record,
                            destination,
                            property,
                            depth,
                        )?,
                        None => value,
                    };
                    target.set(property.as_str(), value);
                }
                (None, Some(default)) => target.set(property.as_str(), default.clone()),
                (None, None) => trace!(property = %property, "No value, leaving unset"),
            }
        }
        Ok(())
    }

    fn apply_transformer(
        &self,
        transformer: &dyn ValueTransformer,
        value: Value,
        record: &RawRecord,
        destination: &str,
        property: &str,
        depth: usize,
    ) -> MappingResult<Value> {
        let context = TransformContext::new(record, destination, property, self, depth);
        transformer
            .transform(value, &context)
            .map_err(|cause| transformation_failed(cause, transformer.name(), destination, property))
    }
}

fn transformation_failed(
    cause: TransformError,
    transformer: &str,
    destination: &str,
    property: &str,
) -> MappingError {
    if let Some(MappingError::CyclicGraphDetected {
        type_name,
        depth,
        max_depth,
    }) = cause.cyclic_cause()
    {
        return MappingError::CyclicGraphDetected {
            type_name: type_name.clone(),
            depth: *depth,
            max_depth: *max_depth,
        };
    }
    MappingError::TransformationFailed {
        destination: destination.to_string(),
        property: property.to_string(),
        transformer: transformer.to_string(),
        reason: cause.to_string(),
        cause,
    }
}

/// Builder for a `Mapper` with custom configuration, strategies, conventions
/// or types registered up front.
#[derive(Debug, Default)]
pub struct MapperBuilder {
    config: MapperConfig,
    hydrators: Vec<Arc<dyn Hydrator>>,
    conventions: Vec<Arc<dyn NamingConvention>>,
    types: Vec<TypeDescriptor>,
}

impl MapperBuilder {
    #[must_use]
    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn hydrator(mut self, hydrator: Arc<dyn Hydrator>) -> Self {
        self.hydrators.push(hydrator);
        self
    }

    #[must_use]
    pub fn convention(mut self, convention: Arc<dyn NamingConvention>) -> Self {
        self.conventions.push(convention);
        self
    }

    #[must_use]
    pub fn register_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn build(self) -> Result<Mapper, ConfigurationError> {
        self.config.validate()?;

        let factory = self
            .hydrators
            .into_iter()
            .fold(HydratorFactory::with_defaults(), HydratorFactory::with_hydrator);
        let mapper = Mapper::from_parts(self.config, factory);
        for convention in self.conventions {
            mapper.matcher.register(convention);
        }
        for descriptor in self.types {
            mapper.register_type(descriptor);
        }

        debug!(config = ?mapper.config, types = mapper.catalog.len(), "Mapper built");
        Ok(mapper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{Condition, MappingOrigin};
    use crate::transform::{CastTarget, CastTransformer, DateTimeTransformer, FnTransformer};
    use serde_json::json;

    fn user_dto() -> TypeDescriptor {
        TypeDescriptor::builder("UserDto")
            .property("id")
            .mapped("name", PropertyMapping::new().from_source("fullName"))
            .mapped("role", PropertyMapping::new().with_default(json!("guest")))
            .ignored("password")
            .build()
    }

    fn mapper() -> Mapper {
        let mapper = Mapper::new();
        mapper.register_type(user_dto());
        mapper
    }

    #[test]
    fn test_unknown_destination() {
        let result = Mapper::new().map(&json!({"id": 1}).into(), "Nope");
        assert!(matches!(
            result,
            Err(MappingError::DestinationTypeNotFound { ref type_name }) if type_name == "Nope"
        ));
    }

    #[test]
    fn test_directives_defaults_and_ignore() {
        let input = json!({"id": 7, "fullName": "Ada", "name": "ignored-by-directive", "password": "x"});
        let user = mapper().map(&input.into(), "UserDto").unwrap();

        assert_eq!(user.to_value(), json!({"id": 7, "name": "Ada", "role": "guest"}));
        assert!(!user.contains("password"));
    }

    #[test]
    fn test_condition_false_behaves_as_absent() {
        let mapper = Mapper::new();
        mapper.register_type(
            TypeDescriptor::builder("Account")
                .mapped(
                    "email",
                    PropertyMapping::new()
                        .from_source("email")
                        .with_default(json!("hidden"))
                        .when(Condition::equals("public", json!(true))),
                )
                .build(),
        );

        let shown = mapper
            .map(&json!({"email": "a@b.c", "public": true}).into(), "Account")
            .unwrap();
        assert_eq!(shown.get("email"), Some(&json!("a@b.c")));

        let hidden = mapper
            .map(&json!({"email": "a@b.c", "public": false}).into(), "Account")
            .unwrap();
        assert_eq!(hidden.get("email"), Some(&json!("hidden")));
    }

    #[test]
    fn test_transformer_failure_is_wrapped() {
        let mapper = Mapper::new();
        mapper.register_type(
            TypeDescriptor::builder("Order")
                .mapped(
                    "total",
                    PropertyMapping::new()
                        .from_source("total")
                        .with_transformer(Arc::new(CastTransformer::new(CastTarget::Integer))),
                )
                .build(),
        );

        let ok = mapper.map(&json!({"total": "42"}).into(), "Order").unwrap();
        assert_eq!(ok.get("total"), Some(&json!(42)));

        match mapper.map(&json!({"total": "lots"}).into(), "Order") {
            Err(MappingError::TransformationFailed {
                destination,
                property,
                transformer,
                ..
            }) => {
                assert_eq!(destination, "Order");
                assert_eq!(property, "total");
                assert_eq!(transformer, "cast<integer>");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_not_transformed() {
        let mapper = Mapper::new();
        mapper.register_type(
            TypeDescriptor::builder("Order")
                .mapped(
                    "total",
                    PropertyMapping::new()
                        .from_source("total")
                        .with_default(json!("n/a"))
                        .with_transformer(Arc::new(CastTransformer::new(CastTarget::Integer))),
                )
                .build(),
        );
        let order = mapper.map(&json!({}).into(), "Order").unwrap();
        assert_eq!(order.get("total"), Some(&json!("n/a")));
    }

    #[test]
    fn test_map_to_keeps_untouched_properties() {
        let mapper = mapper();
        let mut user = MappedObject::new("UserDto");
        user.set("id", json!(1));
        user.set("name", json!("Old"));

        mapper
            .map_to(&json!({"fullName": "New"}).into(), &mut user)
            .unwrap();
        assert_eq!(user.to_value(), json!({"id": 1, "name": "New", "role": "guest"}));
    }

    #[test]
    fn test_cache_hit_on_second_resolution() {
        let mapper = mapper();
        let input: Input = json!({"id": 1, "fullName": "Ada"}).into();

        let first = mapper.resolve_configuration(&input, "UserDto").unwrap();
        let second = mapper.resolve_configuration(&input, "UserDto").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mapper.cache().stats().hits, 1);
        assert_eq!(first.get("id").unwrap().origin, MappingOrigin::Convention);

        mapper.clear_cache();
        assert!(mapper.cache().is_empty());
    }

    #[test]
    fn test_cache_disabled_resolves_every_call() {
        let mapper = Mapper::with_config(MapperConfig::default().with_cache_enabled(false)).unwrap();
        mapper.register_type(user_dto());
        let input: Input = json!({"id": 1}).into();

        mapper.map(&input, "UserDto").unwrap();
        mapper.map(&input, "UserDto").unwrap();
        assert!(mapper.cache().is_empty());
    }

    #[test]
    fn test_reregistering_type_clears_cache() {
        let mapper = mapper();
        mapper.map(&json!({"id": 1}).into(), "UserDto").unwrap();
        assert_eq!(mapper.cache().len(), 1);

        mapper.register_type(TypeDescriptor::builder("UserDto").property("id").build());
        assert!(mapper.cache().is_empty());
    }

    #[test]
    fn test_bad_datetime_format_fails_the_property() {
        let mapper = Mapper::new();
        mapper.register_type(
            TypeDescriptor::builder("EventDto")
                .mapped(
                    "when",
                    PropertyMapping::new()
                        .with_transformer(Arc::new(DateTimeTransformer::new().with_output_format("%Q"))),
                )
                .build(),
        );

        let error = mapper
            .map(&json!({"when": "2024-03-09T00:00:00Z"}).into(), "EventDto")
            .unwrap_err();
        assert!(matches!(
            error,
            MappingError::TransformationFailed { ref property, .. } if property == "when"
        ));
    }

    #[test]
    fn test_reregistering_type_drops_previous_directives() {
        let mapper = Mapper::new();
        mapper.register_type(
            TypeDescriptor::builder("UserDto")
                .mapped("name", PropertyMapping::new().from_source("fullName"))
                .build(),
        );
        let source = json!({"name": "Plain", "fullName": "Stale"});
        let first = mapper.map(&source.clone().into(), "UserDto").unwrap();
        assert_eq!(first.get("name"), Some(&json!("Stale")));

        mapper.register_type(TypeDescriptor::builder("UserDto").property("name").build());
        let second = mapper.map(&source.into(), "UserDto").unwrap();
        assert_eq!(second.get("name"), Some(&json!("Plain")));
        assert!(mapper.storage().get_mapping("*", "UserDto", "name").is_none());
    }

    #[test]
    fn test_self_referencing_transformer_trips_depth_guard() {
        let mapper = Mapper::with_config(MapperConfig::default().with_max_depth(4)).unwrap();
        let recurse = FnTransformer::new("recurse", |_value, ctx| {
            let nested = ctx.map_nested(&Input::Record(ctx.record().clone()), "Node")?;
            Ok(nested.into_value())
        });
        mapper.register_type(
            TypeDescriptor::builder("Node")
                .mapped(
                    "child",
                    PropertyMapping::new()
                        .from_source("child")
                        .with_transformer(Arc::new(recurse)),
                )
                .build(),
        );

        let result = mapper.map(&json!({"child": 1}).into(), "Node");
        assert!(matches!(
            result,
            Err(MappingError::CyclicGraphDetected { depth: 5, max_depth: 4, .. })
        ));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = Mapper::builder()
            .config(MapperConfig::default().with_min_confidence(1.5))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mapper = mapper();
        mapper.reset_to_defaults();
        assert!(mapper.catalog().is_empty());
        assert!(mapper.storage().is_empty());
        assert_eq!(mapper.factory().len(), 6);
    }
}
