//! Symbolic option codec.
//!
//! Closed option families are plain enums whose internal name is the
//! upper-case, underscore-separated constant (`TAR_GZ`) and whose external
//! form is the lower-case, hyphen-separated parameter (`tar-gz`). All
//! conversions between the two go through [`parameter_to_constant`] and
//! [`constant_to_parameter`].
//!
//! Families are declared with the [`symbolic_option!`] macro, which also
//! derives `Display`, `FromStr` and serde support through the codec.

use super::error::{ResolveError, Result};

/// Converts an external parameter string to its internal constant name.
pub fn parameter_to_constant(parameter: &str) -> String {
    parameter.to_ascii_uppercase().replace('-', "_")
}

/// Converts an internal constant name to its external parameter string.
pub fn constant_to_parameter(constant: &str) -> String {
    constant.to_ascii_lowercase().replace('_', "-")
}

/// Canonical external form of a user-supplied string.
pub fn normalize(parameter: &str) -> String {
    constant_to_parameter(&parameter_to_constant(parameter))
}

/// A value drawn from a small closed set with a normalized string form.
pub trait SymbolicOption: Copy + Eq + 'static {
    /// Human-readable family name used in diagnostics.
    const FAMILY: &'static str;

    /// Every member of the family, in declaration order.
    const ALL: &'static [Self];

    /// Internal constant name, e.g. `TAR_GZ`.
    fn constant_name(self) -> &'static str;

    /// External parameter form, e.g. `tar-gz`.
    fn as_parameter(self) -> String {
        constant_to_parameter(self.constant_name())
    }

    /// Parses a parameter, returning `None` when it is not in the family.
    fn parse_lenient(parameter: &str) -> Option<Self> {
        let constant = parameter_to_constant(parameter);
        Self::ALL
            .iter()
            .copied()
            .find(|option| option.constant_name() == constant)
    }

    /// Parses a parameter, failing with [`ResolveError::InvalidOption`].
    fn parse_strict(parameter: &str) -> Result<Self> {
        Self::parse_lenient(parameter).ok_or_else(|| ResolveError::InvalidOption {
            family: Self::FAMILY,
            received: parameter.to_string(),
            valid_values: Self::valid_values(),
        })
    }

    /// External forms of every member.
    fn valid_values() -> Vec<String> {
        Self::ALL.iter().map(|option| option.as_parameter()).collect()
    }
}

/// Parses an optional parameter strictly and rewrites it in canonical form.
///
/// Returns the parsed option, or `None` when the field is unset.
pub fn canonicalize<T: SymbolicOption>(field: &mut Option<String>) -> Result<Option<T>> {
    match field.as_deref() {
        Some(raw) => {
            let option = T::parse_strict(raw)?;
            *field = Some(option.as_parameter());
            Ok(Some(option))
        }
        None => Ok(None),
    }
}

/// Like [`canonicalize`], but fills an unset field with `default`.
pub fn canonicalize_or<T: SymbolicOption>(field: &mut Option<String>, default: T) -> Result<T> {
    let option = canonicalize(field)?.unwrap_or(default);
    *field = Some(option.as_parameter());
    Ok(option)
}

/// Declares a closed option family.
///
/// ```ignore
/// symbolic_option! {
///     /// Archive compression.
///     pub enum Compression: "compression" {
///         Fast => "FAST",
///         High => "HIGH",
///     }
/// }
/// ```
macro_rules! symbolic_option {
    (
        $(#[$meta:meta])*
        pub enum $name:ident: $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $constant:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::config::options::SymbolicOption for $name {
            const FAMILY: &'static str = $family;
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn constant_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $constant ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                use $crate::config::options::SymbolicOption;
                f.write_str(&self.as_parameter())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::config::error::ResolveError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::config::options::SymbolicOption>::parse_strict(s)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                use $crate::config::options::SymbolicOption;
                serializer.serialize_str(&self.as_parameter())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::config::options::SymbolicOption>::parse_strict(&raw)
                    .map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use symbolic_option;

symbolic_option! {
    /// Kind of artifact the backend produces.
    #[derive(Default)]
    pub enum PackagingType: "packaging type" {
        None => "NONE",
        #[default]
        Zip => "ZIP",
        TarGz => "TAR_GZ",
        ExcelsiorInstaller => "EXCELSIOR_INSTALLER",
        OsxAppBundle => "OSX_APP_BUNDLE",
        NativeBundle => "NATIVE_BUNDLE",
    }
}

impl PackagingType {
    /// Whether the artifact is a native installer or bundle rather than an archive.
    pub fn is_native_bundle(self) -> bool {
        matches!(
            self,
            PackagingType::ExcelsiorInstaller
                | PackagingType::OsxAppBundle
                | PackagingType::NativeBundle
        )
    }
}

symbolic_option! {
    /// Inline expansion aggressiveness of the optimizing compiler.
    #[derive(Default)]
    pub enum InlineExpansion: "inline expansion" {
        VeryAggressive => "VERY_AGGRESSIVE",
        #[default]
        Aggressive => "AGGRESSIVE",
        Medium => "MEDIUM",
        Low => "LOW",
        TinyMethodsOnly => "TINY_METHODS_ONLY",
    }
}

symbolic_option! {
    /// Stack trace support level compiled into the executable.
    #[derive(Default)]
    pub enum StackTraceSupport: "stack trace support" {
        #[default]
        Minimal => "MINIMAL",
        Full => "FULL",
        None => "NONE",
    }
}

symbolic_option! {
    /// Disk footprint reduction mode.
    pub enum DiskFootprintReduction: "disk footprint reduction" {
        None => "NONE",
        Medium => "MEDIUM",
        HighDisk => "HIGH_DISK",
        HighMemory => "HIGH_MEMORY",
    }
}

symbolic_option! {
    /// Runtime flavor linked into the executable.
    pub enum RuntimeFlavor: "runtime flavor" {
        Classic => "CLASSIC",
        Desktop => "DESKTOP",
        Server => "SERVER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_family_round_trips<T: SymbolicOption + std::fmt::Debug>() {
        for option in T::ALL {
            let external = option.as_parameter();
            assert_eq!(T::parse_strict(&external).unwrap(), *option);
            assert_eq!(T::parse_strict(&external.to_uppercase()).unwrap(), *option);
            assert_eq!(
                T::parse_strict(&external).unwrap().as_parameter(),
                normalize(&external)
            );
        }
    }

    #[test]
    fn every_family_round_trips() {
        assert_family_round_trips::<PackagingType>();
        assert_family_round_trips::<InlineExpansion>();
        assert_family_round_trips::<StackTraceSupport>();
        assert_family_round_trips::<DiskFootprintReduction>();
        assert_family_round_trips::<RuntimeFlavor>();
    }

    #[test]
    fn external_strings_match_known_sets() {
        assert_eq!(
            PackagingType::valid_values(),
            vec![
                "none",
                "zip",
                "tar-gz",
                "excelsior-installer",
                "osx-app-bundle",
                "native-bundle"
            ]
        );
        assert_eq!(
            InlineExpansion::valid_values(),
            vec![
                "very-aggressive",
                "aggressive",
                "medium",
                "low",
                "tiny-methods-only"
            ]
        );
        assert_eq!(
            DiskFootprintReduction::valid_values(),
            vec!["none", "medium", "high-disk", "high-memory"]
        );
    }

    #[test]
    fn parsing_is_case_and_separator_insensitive() {
        assert_eq!(
            PackagingType::parse_strict("Tar-GZ").unwrap(),
            PackagingType::TarGz
        );
        assert_eq!(
            PackagingType::parse_strict("osx_app_bundle").unwrap(),
            PackagingType::OsxAppBundle
        );
        assert_eq!(normalize("OSX_App_Bundle"), "osx-app-bundle");
    }

    #[test]
    fn strict_parse_rejects_unknown_values() {
        let err = StackTraceSupport::parse_strict("partial").unwrap_err();
        match err {
            ResolveError::InvalidOption {
                family,
                received,
                valid_values,
            } => {
                assert_eq!(family, "stack trace support");
                assert_eq!(received, "partial");
                assert_eq!(valid_values, vec!["minimal", "full", "none"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_parse_returns_none() {
        assert_eq!(RuntimeFlavor::parse_lenient("embedded"), None);
        assert_eq!(
            RuntimeFlavor::parse_lenient("Desktop"),
            Some(RuntimeFlavor::Desktop)
        );
    }

    #[test]
    fn canonicalize_rewrites_field() {
        let mut field = Some("TINY_methods-ONLY".to_string());
        let parsed = canonicalize::<InlineExpansion>(&mut field).unwrap();
        assert_eq!(parsed, Some(InlineExpansion::TinyMethodsOnly));
        assert_eq!(field.as_deref(), Some("tiny-methods-only"));

        let mut unset = None;
        let parsed = canonicalize_or(&mut unset, InlineExpansion::default()).unwrap();
        assert_eq!(parsed, InlineExpansion::Aggressive);
        assert_eq!(unset.as_deref(), Some("aggressive"));
    }

    #[test]
    fn serde_uses_external_form() {
        let json = serde_json::to_string(&PackagingType::ExcelsiorInstaller).unwrap();
        assert_eq!(json, "\"excelsior-installer\"");
        let parsed: PackagingType = serde_json::from_str("\"NATIVE-BUNDLE\"").unwrap();
        assert_eq!(parsed, PackagingType::NativeBundle);
        assert!(serde_json::from_str::<PackagingType>("\"rpm\"").is_err());
    }

    #[test]
    fn native_bundle_kinds() {
        assert!(PackagingType::ExcelsiorInstaller.is_native_bundle());
        assert!(PackagingType::OsxAppBundle.is_native_bundle());
        assert!(!PackagingType::TarGz.is_native_bundle());
    }
}
