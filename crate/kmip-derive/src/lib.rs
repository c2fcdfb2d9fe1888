use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Turn a field-less enum into a KMIP enumeration.
///
/// The attribute adds `#[repr(u32)]` and derives the usual set of traits
/// every KMIP enumeration carries: `Copy`, equality, hashing, `strum`
/// conversions and the KMIP aware serde implementations below.
///
/// # Usage
/// ```Rust
/// #[kmip_enum]
/// pub enum ObjectType {
///   Certificate = 0x0000_0001,
///   SymmetricKey = 0x0000_0002,
/// }
/// ```
/// The crate using the attribute must depend on `serde`, `strum` and `kmip-derive`.
#[proc_macro_attribute]
pub fn kmip_enum(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let expanded = quote! {
        #[repr(u32)]
        #[derive(
            ::kmip_derive::KmipEnumSerialize,
            ::kmip_derive::KmipEnumDeserialize,
            Copy,
            Clone,
            Debug,
            Eq,
            PartialEq,
            Hash,
            ::strum::Display,
            ::strum::EnumString,
            ::strum::EnumIter,
            ::strum::IntoStaticStr,
            ::strum::FromRepr,
        )]
        #input
    };

    TokenStream::from(expanded)
}

/// Serialize a KMIP enum variant with both the variant name and value.
/// Both the name and the value are defined by KMIP. The name is used
/// when serializing to JSON, and the value is used by binary encoders.
///
/// Please note that:
/// - The enum must derive `Copy` and `strum::IntoStaticStr` in addition to `KmipEnumSerialize`.
/// - The enum must be `repr(u32)`.
///
/// # Explanation
///
/// serde loses the variant value with the default `Serialize` implementation
/// and only serializes the variant name.
///
/// `KmipEnumSerialize` converts the variant name to the static string
/// required by `serde::Serializer::serialize_unit_variant` and inserts
/// `*self as u32` in lieu of the variant index.
#[proc_macro_derive(KmipEnumSerialize)]
pub fn kmip_serialize_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let expanded = quote! {
        impl ::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let variant_name: &'static str = self.into();
                #[allow(clippy::as_conversions)]
                let variant_value: u32 = *self as u32;
                serializer.serialize_unit_variant(stringify!(#name), variant_value, variant_name)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Deserialize a KMIP enum variant from either its name or its value.
///
/// JSON carries the variant name (`"AES"`), binary decoders carry the
/// numeric value (`3`). Both are accepted; anything else is rejected with
/// a serde error listing the known variants.
#[proc_macro_derive(KmipEnumDeserialize)]
pub fn kmip_deserialize_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input, "KmipEnumDeserialize only applies to enums")
            .to_compile_error()
            .into();
    };
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return syn::Error::new_spanned(variant, "KMIP enumeration variants cannot hold data")
            .to_compile_error()
            .into();
    }

    let idents: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<String> = idents.iter().map(ToString::to_string).collect();

    let expanded = quote! {
        impl<'de> ::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                const VARIANTS: &[&str] = &[#(#names),*];

                struct KmipEnumVisitor;

                impl ::serde::de::Visitor<'_> for KmipEnumVisitor {
                    type Value = #name;

                    fn expecting(&self, formatter: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                        write!(formatter, "a {} variant name or value", stringify!(#name))
                    }

                    fn visit_str<E>(self, v: &str) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        match v {
                            #(#names => Ok(#name::#idents),)*
                            _ => Err(E::unknown_variant(v, VARIANTS)),
                        }
                    }

                    #[allow(clippy::as_conversions)]
                    fn visit_u64<E>(self, v: u64) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        #(
                            if v == #name::#idents as u64 {
                                return Ok(#name::#idents);
                            }
                        )*
                        Err(E::invalid_value(::serde::de::Unexpected::Unsigned(v), &self))
                    }

                    fn visit_i64<E>(self, v: i64) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        let value = u64::try_from(v).map_err(|_e| {
                            E::invalid_value(::serde::de::Unexpected::Signed(v), &self)
                        })?;
                        self.visit_u64(value)
                    }
                }

                deserializer.deserialize_any(KmipEnumVisitor)
            }
        }
    };

    TokenStream::from(expanded)
}
