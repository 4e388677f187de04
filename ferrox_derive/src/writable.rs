use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

pub fn impl_writable(ast: &syn::DeriveInput) -> TokenStream {
    let name = &ast.ident;

    let fields = match &ast.data {
        syn::Data::Struct(s) => match &s.fields {
            syn::Fields::Named(f) => {
                let recurse = f.named.iter().map(|_if| {
                    let fname = &_if.ident;
                    quote_spanned! { _if.span() =>
                        self.#fname.write_to(_buf)?
                    }
                });
                quote! {
                    #(#recurse;)*
                }
            }
            syn::Fields::Unnamed(f) => {
                let recurse = f.unnamed.iter().enumerate().map(|(i, _if)| {
                    let index = syn::Index::from(i);
                    quote_spanned! { _if.span() =>
                       self.#index.write_to(_buf)?
                    }
                });
                quote! {
                    #(#recurse;)*
                }
            }
            syn::Fields::Unit => {
                quote! {}
            }
        },
        _ => panic!("Expected struct."),
    };

    let ferrox_path = crate::get_ferrox_path();

    let gen = quote! {
        impl #ferrox_path::serialization::Writable for #name {
            #[inline]
            fn write_to<__T: ::std::io::Write>(&self, _buf: &mut __T) -> #ferrox_path::errors::EngineResult<()> {
                #fields
                Ok(())
            }
        }
    };

    gen.into()
}
