use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;

/// Generate a color sample model from a struct with exactly three fields.
///
/// The generated model keeps its fields private and gains:
///   * a `data_source` field holding the optional provenance link,
///   * `new`, one accessor per field, `components`, `with_data_source` and
///     `data_source`,
///   * a `PartialEq` that short-circuits on identity and otherwise compares the
///     fields (never the provenance),
///   * `hash_code` and a `Hash` implementation consistent with `PartialEq`.
#[proc_macro]
pub fn gen_model(input: TokenStream) -> TokenStream {
    let mut input = syn::parse_macro_input!(input as syn::ItemStruct);

    if input.fields.len() != 3 {
        return quote! {
            compile_error!("Models must have exactly 3 fields, one for each component of the color.")
        }
        .into();
    }

    if !input.generics.params.is_empty() {
        return quote! {
            compile_error!("Models can not be generic.")
        }
        .into();
    }

    let field_names = input
        .fields
        .iter()
        .map(|f| f.ident.clone())
        .collect::<Vec<_>>();
    let field_types = input
        .fields
        .iter()
        .map(|f| f.ty.clone())
        .collect::<Vec<_>>();
    let field_docs = input
        .fields
        .iter()
        .map(|f| {
            f.attrs
                .iter()
                .filter(|a| a.path().is_ident("doc"))
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    debug_assert!(field_names.len() == 3);

    let field1 = &field_names[0];
    let field2 = &field_names[1];
    let field3 = &field_names[2];
    let type1 = &field_types[0];
    let type2 = &field_types[1];
    let type3 = &field_types[2];

    // Samples are immutable, so the components are only reachable through
    // the generated accessors.
    input.fields.iter_mut().for_each(|f| {
        f.vis = syn::Visibility::Inherited;
    });

    let attr = match syn::Attribute::parse_outer.parse2(syn::parse_quote! {
        #[derive(Clone, Debug)]
    }) {
        Ok(attr) => attr,
        Err(err) => return err.to_compile_error().into(),
    };
    input.attrs.extend(attr);

    if let syn::Fields::Named(ref mut named) = input.fields {
        match syn::Field::parse_named.parse2(syn::parse_quote! {
            data_source: Option<crate::provenance::DataSource>
        }) {
            Ok(field) => named.named.push(field),
            Err(err) => return err.to_compile_error().into(),
        }
    } else {
        return quote! {
            compile_error!("Models must use named fields.")
        }
        .into();
    }

    let struct_name = input.ident.clone();

    let accessors = field_names
        .iter()
        .zip(field_types.iter())
        .zip(field_docs.iter())
        .map(|((name, ty), docs)| {
            quote! {
                #(#docs)*
                pub fn #name(&self) -> #ty {
                    self.#name
                }
            }
        });

    let model_impl = quote! {
        impl #struct_name {
            /// Create a new color sample without a data source.
            pub fn new(#field1: #type1, #field2: #type2, #field3: #type3) -> Self {
                Self {
                    #field1,
                    #field2,
                    #field3,
                    data_source: None,
                }
            }

            #(#accessors)*

            /// Return the three components of this sample.
            pub fn components(&self) -> (#type1, #type2, #type3) {
                (self.#field1, self.#field2, self.#field3)
            }

            /// Record the sample this one was derived from.
            #[must_use]
            pub fn with_data_source(mut self, source: crate::provenance::DataSource) -> Self {
                self.data_source = Some(source);
                self
            }

            /// Return the sample this one was derived from, if it was recorded.
            pub fn data_source(&self) -> Option<&crate::provenance::DataSource> {
                self.data_source.as_ref()
            }

            /// Return a hash of the components that is consistent with `==`.
            pub fn hash_code(&self) -> u64 {
                use crate::color::HashBits;

                let mut hash = crate::color::HASH_SEED.wrapping_add(self.#field1.hash_bits());
                hash = hash
                    .wrapping_mul(crate::color::HASH_MULTIPLIER)
                    .wrapping_add(self.#field2.hash_bits());
                hash.wrapping_mul(crate::color::HASH_MULTIPLIER)
                    .wrapping_add(self.#field3.hash_bits())
            }
        }

        impl From<(#type1, #type2, #type3)> for #struct_name {
            fn from(value: (#type1, #type2, #type3)) -> Self {
                Self::new(value.0, value.1, value.2)
            }
        }

        impl PartialEq for #struct_name {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self, other)
                    || (self.#field1 == other.#field1
                        && self.#field2 == other.#field2
                        && self.#field3 == other.#field3)
            }
        }

        impl std::hash::Hash for #struct_name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.hash_code());
            }
        }
    };

    quote! {
        #input
        #model_impl
    }
    .into()
}
