//! # Select Binding Resolver
//!
//! Derives the client-side reactive bindings of a `select` form control from
//! its declarative configuration.
//!
//! ## Binding Invariants
//!
//! 1. **One Classification Per Option**: raw entries are normalized once into
//!    [`SelectOption::Plain`] or [`SelectOption::Labeled`]. Value, label, name
//!    and disabled state are all read from that variant.
//!
//! 2. **First-Value Sampling**: the value type is inferred from the first
//!    option only. An integral first value requests `v-model.number` on a
//!    single select. Multi selects always bind through plain `v-model`.
//!
//! 3. **Stable Names**: `ref`, `@change`, option ids and option names are pure
//!    functions of the key, the multiplicity and the option value.
//!    - `select.color` / `select.multiple.color`
//!    - `inputChanged(color)`
//!    - `<id or key>_<value>` / `<key>_<value>`
//!
//! 4. **Live Error Flag**: the class binding is emitted as a template
//!    (`{ 'error': errors['color'] }`). Resolution never reads the flag's
//!    current value, so later validation passes restyle the control without
//!    regenerating its bindings.
//!
//! 5. **Overrides Win**: caller attributes are merged on top of the computed
//!    bindings.
//!
//! ## Failure Modes
//!
//! A missing key, missing or non-list options, an empty option list and a
//! frozen error flag fail the resolution with a coded [`BindingError`]. Keys
//! that do not parse as identifiers, mixed option types and disabled values
//! that match no option resolve normally.

mod batch;
mod config;
mod error;
mod error_state;
mod expression;
mod model;
mod naming;
mod option;
mod resolver;


pub use batch::resolve_all;
pub use config::{ErrorConfig, ResolveOptions, SelectConfig};
pub use error::*;
pub use error_state::{error_binding, is_valid_class_name, ErrorBinding, ErrorLookup, FormErrors};
pub use expression::{verify_error_binding, verify_expression};
pub use model::{infer_value_type, select_model_mode, ModelDirective, ModelMode, ValueType};
pub use naming::{
    change_event_key, js_string, model_target, option_dom_id, option_internal_name,
    reference_name,
};
pub use option::{normalize_options, OptionValue, RawForm, SelectOption};
pub use resolver::{
    resolve, resolve_json, resolve_with, BindingDescriptor, LabelBinding, OptionBinding,
    PlaceholderBinding, SelectBindingResolver,
};

#[cfg(feature = "napi")]
pub use resolver::resolve_select_native;
