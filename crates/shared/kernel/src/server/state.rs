use axum::extract::FromRef;
use dhub_database::Database;
use dhub_domain::config::ApiConfig;
use dhub_domain::registry::{FeatureSlice, InitializedSlice};
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

type SliceMap = FxHashMap<TypeId, InitializedSlice>;

#[dhub_derive::dhub_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Everything handlers can reach: the loaded configuration, the database
/// handle, and the type-erased feature slices registered at startup.
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    slices: SliceMap,
}

/// Cloneable Axum state; all clones share one [`ApiStateInner`].
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    /// Looks up a registered slice by its concrete type.
    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        let entry = self.inner.slices.get(&TypeId::of::<T>())?;
        entry.state.as_any().downcast_ref::<T>()
    }

    /// Like [`ApiState::get_slice`], but a missing slice becomes a typed error
    /// the HTTP layer can map.
    ///
    /// # Errors
    /// [`ApiStateError::MissingSlice`] when the slice was never registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.database.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    slices: SliceMap,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Adds one initialized slice; a later slice of the same type replaces an
    /// earlier one.
    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// [`ApiStateError::Validation`] when the configuration or the database
    /// handle was never supplied.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| required("ApiConfig"))?;
        let database = self.database.ok_or_else(|| required("Database"))?;
        let slices = self.slices;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, database, slices }) })
    }
}

fn required(what: &'static str) -> ApiStateError {
    ApiStateError::Validation { message: format!("{what} not provided").into(), context: None }
}
