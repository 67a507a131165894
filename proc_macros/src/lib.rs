use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemEnum};

#[proc_macro_derive(AsText)]
pub fn as_text(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as ItemEnum);

    let ident = input.ident;
    let matches = input
        .variants
        .iter()
        .map(|variant| {
            let var_ident = variant.ident.clone();
            let label = kebab_case(&variant.ident.to_string());

            quote! {
                #ident::#var_ident => #label
            }
        })
        .collect::<Vec<_>>();

    let parses = input
        .variants
        .iter()
        .map(|variant| {
            let var_ident = variant.ident.clone();
            let label = kebab_case(&variant.ident.to_string());

            quote! {
                #label => Some(#ident::#var_ident)
            }
        })
        .collect::<Vec<_>>();

    // Build the output, possibly using quasi-quotation
    let expanded = quote! {
        impl #ident {
            pub fn as_text(&self) -> &'static str {
                match self {
                    #(#matches),*
                }
            }

            pub fn from_text(s: &str) -> Option<Self> {
                match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
                    #(#parses,)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for #ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_text())
            }
        }
    };

    // Hand the output tokens back to the compiler
    TokenStream::from(expanded)
}

#[proc_macro_derive(Variants)]
pub fn variants(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ItemEnum);

    let ident = input.ident;
    let all = input
        .variants
        .iter()
        .map(|variant| {
            let var_ident = variant.ident.clone();

            quote! {
                #ident::#var_ident
            }
        })
        .collect::<Vec<_>>();

    let expanded = quote! {
        impl #ident {
            pub const ALL: &'static [#ident] = &[#(#all),*];
        }
    };

    TokenStream::from(expanded)
}

/// `IcebergObscure` -> `iceberg-obscure`
fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);

    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
