//! A type-keyed table of codecs for hosts that pick codecs at runtime.
//!
//! Static composition through [resolve_codec](crate::codec::resolve_codec) covers every built-in
//! type. A [CodecRegistry] exists for callers that need to swap in their own element codecs, e.g.
//! one that validates coordinate ranges, without threading generics through their code. It is
//! populated once through [CodecRegistryBuilder] and is read-only afterwards, so it can be shared
//! freely between threads.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::codec::{CoordinateCodec, ElementCodec, LineStringCodec, MultiLineStringCodec};
use crate::error::{CodecError, Result};
use crate::scalar::{Coordinates, LineStringCoordinates, MultiLineStringCoordinates};

/// A codec for `T` that can be shared between threads.
pub type SharedCodec<T> = Arc<dyn ElementCodec<Value = T> + Send + Sync>;

/// An immutable table mapping value types to their codecs.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl CodecRegistry {
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// A registry holding the built-in codecs for [Coordinates], [LineStringCoordinates] and
    /// `Option<MultiLineStringCoordinates>`.
    pub fn with_defaults() -> Self {
        let coords: SharedCodec<Coordinates> = Arc::new(CoordinateCodec);
        let line_strings: SharedCodec<LineStringCoordinates> =
            Arc::new(LineStringCodec::new(Arc::clone(&coords)));
        let multi_line_strings: SharedCodec<Option<MultiLineStringCoordinates>> =
            Arc::new(MultiLineStringCodec::new(Arc::clone(&line_strings)));

        Self {
            codecs: HashMap::from([
                entry(coords),
                entry(line_strings),
                entry(multi_line_strings),
            ]),
        }
    }

    /// Look up the codec registered for `T`.
    pub fn lookup<T: 'static>(&self) -> Result<SharedCodec<T>> {
        self.codecs
            .get(&TypeId::of::<T>())
            .and_then(|codec| codec.downcast_ref::<SharedCodec<T>>())
            .cloned()
            .ok_or(CodecError::UnresolvedElementCodec(type_name::<T>()))
    }

    /// Whether a codec is registered for `T`.
    pub fn contains<T: 'static>(&self) -> bool {
        self.codecs.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("len", &self.codecs.len())
            .finish()
    }
}

type Entry = (TypeId, Box<dyn Any + Send + Sync>);

/// A deferred registration, run against the partially built registry.
type Registration = Box<dyn FnOnce(&CodecRegistry) -> Result<Entry>>;

/// Collects codecs for a [CodecRegistry].
///
/// Registrations run in order, and a composite registration can look up the codecs registered
/// before it, so a custom coordinate codec registered first is picked up by the line string codec
/// registered after it.
#[derive(Default)]
pub struct CodecRegistryBuilder {
    registrations: Vec<Registration>,
}

impl CodecRegistryBuilder {
    /// Register `codec` as the codec for `T`, replacing any earlier registration.
    pub fn register<T, C>(mut self, codec: C) -> Self
    where
        T: 'static,
        C: ElementCodec<Value = T> + Send + Sync + 'static,
    {
        let shared: SharedCodec<T> = Arc::new(codec);
        let registration: Registration = Box::new(move |_| Ok(entry(shared)));
        self.registrations.push(registration);
        self
    }

    /// Register a codec for `T` built from codecs registered earlier.
    pub fn register_with<T, C, F>(mut self, make_codec: F) -> Self
    where
        T: 'static,
        C: ElementCodec<Value = T> + Send + Sync + 'static,
        F: FnOnce(&CodecRegistry) -> Result<C> + 'static,
    {
        self.registrations.push(Box::new(move |registry| {
            let shared: SharedCodec<T> = Arc::new(make_codec(registry)?);
            Ok(entry(shared))
        }));
        self
    }

    /// Register the built-in codecs, each composed from the codecs registered before it.
    pub fn with_defaults(self) -> Self {
        self.register::<Coordinates, _>(CoordinateCodec)
            .register_with::<LineStringCoordinates, _, _>(|registry| {
                Ok(LineStringCodec::new(registry.lookup::<Coordinates>()?))
            })
            .register_with::<Option<MultiLineStringCoordinates>, _, _>(|registry| {
                Ok(MultiLineStringCodec::new(
                    registry.lookup::<LineStringCoordinates>()?,
                ))
            })
    }

    /// Run all registrations and freeze the registry.
    ///
    /// Fails with [CodecError::UnresolvedElementCodec] if a composite codec depends on a type
    /// that was not registered before it.
    pub fn build(self) -> Result<CodecRegistry> {
        let mut registry = CodecRegistry::default();
        for registration in self.registrations {
            let (type_id, codec) = registration(&registry)?;
            registry.codecs.insert(type_id, codec);
        }
        log::debug!("built codec registry with {} codec(s)", registry.len());
        Ok(registry)
    }
}

impl std::fmt::Debug for CodecRegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecRegistryBuilder")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

fn entry<T: 'static>(codec: SharedCodec<T>) -> Entry {
    (TypeId::of::<T>(), Box::new(codec))
}
