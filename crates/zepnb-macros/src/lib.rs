//! Proc-macros for the zepnb configuration system.
//!
//! `#[derive(Configurable)]` generates two inherent methods on a config
//! struct:
//!
//! - `apply_override(&mut self, key, value)` for `--config KEY=VALUE`
//! - `merge_fields(&mut self, other)` for layering config files
//!
//! Only fields carrying a `#[config(...)]` attribute can be overridden. The
//! generated code refers to `crate::error::ConfigError`.

use proc_macro::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Data, DeriveInput, Fields, Type, parse_macro_input};

/// Parsed `#[config(...)]` attribute of a field.
#[derive(Default)]
struct FieldConfig {
  /// Override key, defaults to the field name.
  key:         Option<String>,
  /// An empty override value resets an `Option` field to `None`.
  allow_empty: bool,
  /// Whether the field had a `#[config]` attribute at all.
  present:     bool,
}

impl FieldConfig {
  fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
    let mut config = Self::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
      config.present = true;
      attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
          let lit: syn::LitStr = meta.value()?.parse()?;
          config.key = Some(lit.value());
          Ok(())
        } else if meta.path.is_ident("allow_empty") {
          config.allow_empty = true;
          Ok(())
        } else {
          Err(meta.error("unsupported config attribute"))
        }
      })?;
    }

    Ok(config)
  }
}

/// Coarse classification of a field type, by its token spelling.
enum FieldKind {
  Option,
  Bool,
  Other,
}

impl FieldKind {
  fn of(ty: &Type) -> Self {
    let spelled: String = ty
      .to_token_stream()
      .to_string()
      .chars()
      .filter(|c| !c.is_whitespace())
      .collect();

    if spelled.starts_with("Option<") {
      Self::Option
    } else if spelled == "bool" {
      Self::Bool
    } else {
      Self::Other
    }
  }
}

/// Derive macro for configuration structs.
#[proc_macro_derive(Configurable, attributes(config))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  expand(&input)
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) =
    input.generics.split_for_impl();

  let Data::Struct(data) = &input.data else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable can only be derived for structs",
    ));
  };
  let Fields::Named(fields) = &data.fields else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable requires named fields",
    ));
  };

  let mut override_arms = Vec::new();
  let mut merge_steps = Vec::new();

  for field in &fields.named {
    let Some(ident) = field.ident.as_ref() else {
      continue;
    };
    let config = FieldConfig::from_attrs(&field.attrs)?;
    let kind = FieldKind::of(&field.ty);

    merge_steps.push(merge_step(ident, &kind));

    if config.present {
      let key = config.key.clone().unwrap_or_else(|| ident.to_string());
      override_arms.push(override_arm(ident, &key, &kind, &config));
    }
  }

  Ok(quote! {
    impl #impl_generics #name #ty_generics #where_clause {
      /// Apply a single `KEY=VALUE` override.
      ///
      /// # Errors
      ///
      /// Returns an error if the key is unknown or the value cannot be
      /// parsed for that key.
      pub fn apply_override(
        &mut self,
        key: &str,
        value: &str,
      ) -> ::std::result::Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError;

        #(#override_arms)*

        Err(ConfigError::UnknownKey(key.to_string()))
      }

      /// Merge another config into this one, the other taking precedence.
      pub fn merge_fields(&mut self, other: Self) {
        #(#merge_steps)*
      }
    }
  })
}

fn override_arm(
  ident: &syn::Ident,
  key: &str,
  kind: &FieldKind,
  config: &FieldConfig,
) -> proc_macro2::TokenStream {
  let assignment = match kind {
    FieldKind::Option if config.allow_empty => {
      quote! {
        self.#ident = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(|_| ConfigError::InvalidValue {
            key:   #key.to_string(),
            value: value.to_string(),
          })?)
        };
      }
    },
    FieldKind::Option => {
      quote! {
        self.#ident = Some(value.parse().map_err(|_| ConfigError::InvalidValue {
          key:   #key.to_string(),
          value: value.to_string(),
        })?);
      }
    },
    FieldKind::Bool => {
      quote! {
        self.#ident = match value.to_lowercase().as_str() {
          "true" | "yes" | "1" => true,
          "false" | "no" | "0" => false,
          _ => {
            return Err(ConfigError::InvalidValue {
              key:   #key.to_string(),
              value: value.to_string(),
            });
          },
        };
      }
    },
    FieldKind::Other => {
      quote! {
        self.#ident = value.parse().map_err(|_| ConfigError::InvalidValue {
          key:   #key.to_string(),
          value: value.to_string(),
        })?;
      }
    },
  };

  quote! {
    if key == #key {
      #assignment
      return Ok(());
    }
  }
}

fn merge_step(
  ident: &syn::Ident,
  kind: &FieldKind,
) -> proc_macro2::TokenStream {
  match kind {
    FieldKind::Option => {
      quote! {
        if other.#ident.is_some() {
          self.#ident = other.#ident;
        }
      }
    },
    FieldKind::Bool | FieldKind::Other => {
      quote! {
        self.#ident = other.#ident;
      }
    },
  }
}
