use convert_case::Case;
use convert_case::Casing;
use darling::FromDeriveInput;
use darling::FromField;
use darling::FromMeta;
use darling::FromVariant;
use proc_macro2::Ident;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::DeriveInput;
use syn::Generics;
use syn::Path;
use syn::Type;
use syn::ext::IdentExt;

#[derive(Debug, Clone, Copy, FromMeta)]
enum RenameRule {
    #[darling(rename = "PascalCase")]
    Pascal,
    #[darling(rename = "camelCase")]
    Camel,
    #[darling(rename = "snake_case")]
    Snake,
    #[darling(rename = "UPPER_SNAKE_CASE")]
    UpperSnake,
}

impl RenameRule {
    fn apply(self, name: &str) -> String {
        let case = match self {
            RenameRule::Pascal => Case::Pascal,
            RenameRule::Camel => Case::Camel,
            RenameRule::Snake => Case::Snake,
            RenameRule::UpperSnake => Case::UpperSnake,
        };
        name.from_case(Case::Snake).to_case(case)
    }
}

#[derive(Debug, FromField)]
#[darling(attributes(dal))]
struct FieldReceiver {
    pub ident: Option<Ident>,
    pub ty:    Type,

    #[darling(default)]
    pub ignore: bool,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub property: bool,

    #[darling(default)]
    pub read_only: bool,

    #[darling(default)]
    pub setter: Option<Path>,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(dal), supports(struct_named))]
struct EntityReceiver {
    pub ident:    Ident,
    pub generics: Generics,
    pub data:     darling::ast::Data<(), FieldReceiver>,

    #[darling(default)]
    pub schema: Option<String>,

    #[darling(default)]
    pub table: Option<String>,

    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    #[darling(default)]
    pub anonymous: bool,

    #[darling(default)]
    pub from_value: bool,
}

#[derive(Debug)]
enum MemberAccess {
    Field,
    Property,
    ReadOnly,
    Setter(Path),
}

#[derive(Debug)]
struct MemberInfo {
    pub field_name:  Ident,
    pub column_name: String,
    pub field_type:  Type,
    pub access:      MemberAccess,
    pub ignored:     bool,
}

impl FieldReceiver {
    fn to_member_info(self, rename_all: Option<RenameRule>) -> darling::Result<MemberInfo> {
        let field_name = self.ident.ok_or_else(|| darling::Error::custom("expected a named field"))?;
        let raw_name = field_name.unraw().to_string();
        let column_name = match (self.name, rename_all) {
            (Some(name), _) => name,
            (None, Some(rule)) => rule.apply(&raw_name),
            (None, None) => raw_name,
        };

        let access = match (self.setter, self.read_only, self.property) {
            (Some(_), true, _) => {
                return Err(darling::Error::custom("`setter` and `read_only` cannot be combined").with_span(&field_name));
            }
            (Some(path), false, _) => MemberAccess::Setter(path),
            (None, true, _) => MemberAccess::ReadOnly,
            (None, false, true) => MemberAccess::Property,
            (None, false, false) => MemberAccess::Field,
        };

        Ok(MemberInfo { field_name, column_name, field_type: self.ty, access, ignored: self.ignore })
    }
}

fn member_tokens(member: &MemberInfo) -> TokenStream2 {
    let field = &member.field_name;
    let column = &member.column_name;
    let ty = &member.field_type;
    let getter = quote! { |item: &Self| -> #ty { ::core::clone::Clone::clone(&item.#field) } };

    match &member.access {
        MemberAccess::Field => quote! {
            ::tursodal::metadata::MemberDescriptor::field(#column, #getter, |item: &mut Self, value: #ty| {
                item.#field = value;
            })
        },
        MemberAccess::Property => quote! {
            ::tursodal::metadata::MemberDescriptor::property(#column, #getter, |item: &mut Self, value: #ty| {
                item.#field = value;
                ::core::result::Result::Ok(())
            })
        },
        MemberAccess::Setter(path) => quote! {
            ::tursodal::metadata::MemberDescriptor::property(#column, #getter, |item: &mut Self, value: #ty| {
                #path(item, value).map_err(::core::convert::Into::into)
            })
        },
        MemberAccess::ReadOnly => quote! {
            ::tursodal::metadata::MemberDescriptor::read_only(#column, #getter)
        },
    }
}

/// Implements `Entity` and `FromRecord` for a struct with named fields
///
/// Struct attributes: `schema`, `table`, `rename_all`, `anonymous`, `from_value`.
/// Field attributes: `ignore`, `name`, `property`, `read_only`, `setter = "path"`.
#[proc_macro_derive(Entity, attributes(dal))]
pub fn derive_entity(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let receiver = match EntityReceiver::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors().into(),
    };

    match impl_entity(receiver) {
        Ok(expanded) => proc_macro::TokenStream::from(expanded),
        Err(e) => e.write_errors().into(),
    }
}

fn impl_entity(receiver: EntityReceiver) -> darling::Result<TokenStream2> {
    let name = &receiver.ident;
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();
    let rename_all = receiver.rename_all;

    let fields = receiver.data.take_struct().ok_or_else(|| darling::Error::unsupported_shape("enum"))?.fields;
    let mut errors = darling::Error::accumulator();
    let members: Vec<MemberInfo> =
        fields.into_iter().filter_map(|f| errors.handle(f.to_member_info(rename_all))).collect();
    errors.finish()?;

    let builder = if receiver.anonymous {
        quote! { ::tursodal::metadata::TypeMetadata::<Self>::anonymous() }
    } else {
        let type_name = name.unraw().to_string();
        quote! { ::tursodal::metadata::TypeMetadata::<Self>::builder(#type_name) }
    };
    let schema = receiver.schema.iter().map(|schema| quote! { .schema(#schema) });
    let table = receiver.table.iter().map(|table| quote! { .table(#table) });

    let registrations = members.iter().map(|member| {
        if member.ignored {
            let column = &member.column_name;
            quote! { .exclude(#column) }
        } else {
            let descriptor = member_tokens(member);
            quote! { .member(#descriptor) }
        }
    });

    let from_scalar = receiver.from_value.then(|| {
        quote! {
            fn from_scalar(value: ::tursodal::Value) -> ::tursodal::Result<Self> {
                <Self as ::tursodal::FromValue>::from_value(value)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::tursodal::Entity for #name #ty_generics #where_clause {
            fn describe() -> ::tursodal::metadata::TypeMetadata<Self> {
                #builder
                    #(#schema)*
                    #(#table)*
                    #(#registrations)*
                    .build()
            }

            #from_scalar
        }

        impl #impl_generics ::tursodal::FromRecord for #name #ty_generics #where_clause {
            fn from_record(record: &::tursodal::Record) -> ::tursodal::Result<Self> {
                ::tursodal::mapper::map_entity(record)
            }
        }
    })
}

#[derive(Debug, FromVariant)]
#[darling(attributes(dal))]
struct VariantReceiver {
    pub ident: Ident,

    #[darling(default)]
    pub rename: Option<String>,
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(dal), supports(enum_unit))]
struct DbEnumReceiver {
    pub ident:    Ident,
    pub generics: Generics,
    pub data:     darling::ast::Data<VariantReceiver, ()>,
}

/// Implements `DbEnum`, `FromValue`, `IntoValue` and `FromRecord` for a unit enum
///
/// Values are stored by variant name (`#[dal(rename = "...")]` overrides it);
/// database null maps to the first variant.
#[proc_macro_derive(DbEnum, attributes(dal))]
pub fn derive_db_enum(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    let receiver = match DbEnumReceiver::from_derive_input(&input) {
        Ok(r) => r,
        Err(e) => return e.write_errors().into(),
    };

    match impl_db_enum(receiver) {
        Ok(expanded) => proc_macro::TokenStream::from(expanded),
        Err(e) => e.write_errors().into(),
    }
}

fn impl_db_enum(receiver: DbEnumReceiver) -> darling::Result<TokenStream2> {
    let name = &receiver.ident;
    let (impl_generics, ty_generics, where_clause) = receiver.generics.split_for_impl();
    let variants = receiver.data.take_enum().ok_or_else(|| darling::Error::unsupported_shape("struct"))?;

    if variants.is_empty() {
        return Err(darling::Error::custom("DbEnum requires at least one variant").with_span(name));
    }

    let idents: Vec<&Ident> = variants.iter().map(|v| &v.ident).collect();
    let stored: Vec<String> =
        variants.iter().map(|v| v.rename.clone().unwrap_or_else(|| v.ident.unraw().to_string())).collect();
    let indexes = 0..variants.len();
    let first = idents[0];

    Ok(quote! {
        impl #impl_generics ::tursodal::DbEnum for #name #ty_generics #where_clause {
            const VARIANT_NAMES: &'static [&'static str] = &[#(#stored),*];

            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#idents => #stored,)*
                }
            }

            fn from_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#indexes => ::core::option::Option::Some(Self::#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn zero() -> Self {
                Self::#first
            }
        }

        impl #impl_generics ::tursodal::FromValue for #name #ty_generics #where_clause {
            fn from_value(value: ::tursodal::Value) -> ::tursodal::Result<Self> {
                ::tursodal::value::parse_enum(value)
            }
        }

        impl #impl_generics ::tursodal::IntoValue for #name #ty_generics #where_clause {
            fn into_value(self) -> ::tursodal::Value {
                ::tursodal::Value::Text(::std::string::ToString::to_string(
                    <Self as ::tursodal::DbEnum>::variant_name(&self),
                ))
            }
        }

        impl #impl_generics ::tursodal::FromRecord for #name #ty_generics #where_clause {
            fn from_record(record: &::tursodal::Record) -> ::tursodal::Result<Self> {
                ::tursodal::mapper::map_scalar(record)
            }
        }
    })
}
