extern crate proc_macro;

use case::CaseExt;
use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, FieldsNamed, Ident, Path};

/// Derives the `Model` trait for a root application model.
///
/// The struct must have named fields, the first of which must be named `ctx`
/// and implement `Update<E>`. Every other field must implement
/// `UpdateWithCtx<E>`. The environment type is given with the `#[model(Env)]`
/// attribute.
///
/// Alongside the `Model` impl, a `<Name>Field` enum is generated with one
/// variant per field, used by the runtime to report which parts of the model
/// changed on each update.
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let env = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("model"))
        .map(|attr| {
            attr.parse_args::<Path>()
                .expect("#[model(..)] expects an environment type")
        })
        .expect("#[derive(Model)] requires a #[model(Env)] attribute");
    let core = match crate_name("magnetar-core") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote! { ::#ident }
        }
        Err(_) => quote! { ::magnetar_core },
    };
    let fields = match input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(FieldsNamed { named, .. }),
            ..
        }) => named,
        _ => panic!("#[derive(Model)] is only defined for structs with named fields"),
    };
    let mut fields = fields.iter();
    let ctx_field = fields
        .next()
        .expect("#[derive(Model)] requires a ctx field");
    let ctx_ident = ctx_field
        .ident
        .as_ref()
        .expect("#[derive(Model)] requires named fields");
    if ctx_ident != "ctx" {
        panic!("#[derive(Model)] requires the first field to be named ctx");
    }
    let ctx_ty = &ctx_field.ty;
    let fields = fields
        .map(|field| {
            let ident = field
                .ident
                .as_ref()
                .expect("#[derive(Model)] requires named fields");
            let variant = format_ident!("{}", ident.to_string().to_camel());
            (ident, variant, &field.ty)
        })
        .collect::<Vec<_>>();
    let name = &input.ident;
    let field_name = format_ident!("{name}Field");
    let field_variants = fields.iter().map(|(_, variant, _)| variant);
    let field_updates = fields.iter().map(|(ident, variant, ty)| {
        quote! {
            let field_effects =
                <#ty as #core::runtime::UpdateWithCtx<#env>>::update(&mut self.#ident, msg, &self.ctx);
            if field_effects.has_changed {
                fields.push(#field_name::#variant);
            }
            effects = effects.join(field_effects);
        }
    });
    let single_field_updates = fields.iter().map(|(ident, variant, ty)| {
        quote! {
            #field_name::#variant => {
                let effects =
                    <#ty as #core::runtime::UpdateWithCtx<#env>>::update(&mut self.#ident, msg, &self.ctx);
                let fields = if effects.has_changed {
                    vec![#field_name::#variant]
                } else {
                    vec![]
                };
                (effects.into_iter().collect(), fields)
            }
        }
    });
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        #[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum #field_name {
            Ctx,
            #(#field_variants),*
        }

        impl #impl_generics #core::runtime::Model<#env> for #name #ty_generics #where_clause {
            type Field = #field_name;
            fn update(
                &mut self,
                msg: &#core::runtime::msg::Msg,
            ) -> (Vec<#core::runtime::Effect>, Vec<Self::Field>) {
                let mut fields = vec![];
                let mut effects =
                    <#ctx_ty as #core::runtime::Update<#env>>::update(&mut self.ctx, msg);
                if effects.has_changed {
                    fields.push(#field_name::Ctx);
                }
                #(#field_updates)*
                (effects.into_iter().collect(), fields)
            }
            fn update_field(
                &mut self,
                msg: &#core::runtime::msg::Msg,
                field: &Self::Field,
            ) -> (Vec<#core::runtime::Effect>, Vec<Self::Field>) {
                match field {
                    #field_name::Ctx => {
                        let effects =
                            <#ctx_ty as #core::runtime::Update<#env>>::update(&mut self.ctx, msg);
                        let fields = if effects.has_changed {
                            vec![#field_name::Ctx]
                        } else {
                            vec![]
                        };
                        (effects.into_iter().collect(), fields)
                    }
                    #(#single_field_updates)*
                }
            }
        }
    };
    TokenStream::from(expanded)
}
