//! Derive macros for declaring table models.
//!
//! This crate provides the `#[derive(Model)]` macro, which turns struct and
//! field attributes into a `sqlweave_core::schema::ModelDefinition`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, LitStr, Token};

/// Derives `sqlweave_core::schema::Model` for a struct.
///
/// Field declarations are applied in field order, followed by the struct
/// level declarations. Fields without a `#[column]` attribute are not
/// columns.
///
/// # Struct Attributes
///
/// - `#[table]` - Declares a table named after the lower-cased struct name
/// - `#[table(name = "users")]` - Declares a table with an explicit name
/// - `#[primary_key("a", "b")]` - Appends columns to the primary key
/// - `#[foreign_key(column = "author_id", reference = "users(id)")]` -
///   Table-level foreign key; `column` is required. Accepts `on_delete` and
///   `on_update`.
/// - `#[index(name = "idx", columns("a", "b"), unique)]` - Adds an index
///
/// # Field Attributes
///
/// - `#[column(sql_type = "TEXT")]` - Declares a column with a raw SQL type
/// - `#[column(name = "...")]` - Overrides the column name
/// - `#[column(nullable)]`, `#[column(nullable = false)]`,
///   `#[column(not_null)]` - Nullability (nullable when omitted)
/// - `#[column(unique)]`, `#[column(primary)]`
/// - `#[column(default = expr)]` - Literal default, quoted on output
/// - `#[column(default_sql = "CURRENT_TIMESTAMP")]` - Raw SQL default
/// - `#[column(check = "expr")]` - CHECK constraint
/// - `#[column(references = "users(id)", on_delete = "CASCADE")]` - Foreign
///   key on the column
/// - `#[primary_key]` - Appends the field to the primary key
/// - `#[foreign_key(reference = "users(id)")]` - Foreign key on the field;
///   the column defaults to the field name
///
/// Cascade actions are one of `RESTRICT`, `CASCADE`, `SET NULL`,
/// `SET DEFAULT` (or `DEFAULT`) and `NO ACTION`, case-insensitive.
#[proc_macro_derive(Model, attributes(table, column, primary_key, foreign_key, index))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_model_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_model_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let definition_name = struct_name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return model_impl(input, &definition_name, Vec::new());
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Model derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Model derive only supports structs",
            ));
        }
    };

    let mut declarations = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        declarations.extend(field_declarations(field_name, &field.attrs)?);
    }

    model_impl(input, &definition_name, declarations)
}

fn model_impl(
    input: &DeriveInput,
    definition_name: &str,
    mut declarations: Vec<TokenStream2>,
) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table = table_declaration(&input.attrs)?;
    declarations.extend(struct_declarations(&input.attrs)?);

    Ok(quote! {
        impl #impl_generics ::sqlweave_core::schema::Model for #struct_name #ty_generics #where_clause {
            fn definition() -> ::sqlweave_core::schema::ModelDefinition {
                ::sqlweave_core::schema::ModelDefinition::new(#definition_name)
                    #table
                    #(#declarations)*
            }
        }
    })
}

#[derive(Default)]
struct ForeignKeyAttrs {
    column: Option<LitStr>,
    reference: Option<LitStr>,
    on_delete: Option<Ident>,
    on_update: Option<Ident>,
}

impl ForeignKeyAttrs {
    /// Consumes a `reference`, `on_delete` or `on_update` entry. Returns
    /// false for any other key.
    fn parse_entry(&mut self, meta: &ParseNestedMeta<'_>, reference_key: &str) -> syn::Result<bool> {
        if meta.path.is_ident(reference_key) {
            self.reference = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("on_delete") {
            self.on_delete = Some(parse_cascade(&meta.value()?.parse()?)?);
        } else if meta.path.is_ident("on_update") {
            self.on_update = Some(parse_cascade(&meta.value()?.parse()?)?);
        } else {
            return Ok(false);
        }
        Ok(true)
    }

    fn to_tokens(&self, reference: &LitStr) -> TokenStream2 {
        let column = self.column.as_ref().map(|c| quote! { .column(#c) });
        let on_delete = self
            .on_delete
            .as_ref()
            .map(|a| quote! { .on_delete(::sqlweave_core::schema::CascadeAction::#a) });
        let on_update = self
            .on_update
            .as_ref()
            .map(|a| quote! { .on_update(::sqlweave_core::schema::CascadeAction::#a) });
        quote! {
            ::sqlweave_core::schema::ForeignKey::references(#reference)
                #column
                #on_delete
                #on_update
        }
    }
}

#[derive(Default)]
struct ColumnAttrs {
    sql_type: Option<LitStr>,
    name: Option<LitStr>,
    nullable: Option<bool>,
    unique: bool,
    primary: bool,
    default: Option<Expr>,
    default_sql: Option<LitStr>,
    check: Option<LitStr>,
    foreign_key: ForeignKeyAttrs,
}

fn field_declarations(field_name: &Ident, attrs: &[Attribute]) -> syn::Result<Vec<TokenStream2>> {
    let property = field_name.to_string();
    let mut declarations = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("column") {
            declarations.push(column_declaration(&property, attr)?);
        } else if attr.path().is_ident("primary_key") {
            let columns = string_list(attr)?;
            if columns.is_empty() {
                declarations.push(quote! { .primary_key_column(#property) });
            } else {
                declarations.push(quote! { .primary_key([#(#columns),*]) });
            }
        } else if attr.path().is_ident("foreign_key") {
            let fk = parse_foreign_key(attr)?;
            let Some(reference) = &fk.reference else {
                return Err(syn::Error::new_spanned(attr, "foreign_key requires `reference`"));
            };
            let foreign_key = fk.to_tokens(reference);
            declarations.push(quote! { .property_foreign_key(#property, #foreign_key) });
        }
    }

    Ok(declarations)
}

fn column_declaration(property: &str, attr: &Attribute) -> syn::Result<TokenStream2> {
    let mut result = ColumnAttrs::default();

    attr.parse_nested_meta(|meta| {
        if result.foreign_key.parse_entry(&meta, "references")? {
            return Ok(());
        }
        if meta.path.is_ident("sql_type") {
            result.sql_type = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("name") {
            result.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("nullable") {
            result.nullable = Some(if meta.input.peek(Token![=]) {
                meta.value()?.parse::<syn::LitBool>()?.value
            } else {
                true
            });
        } else if meta.path.is_ident("not_null") {
            result.nullable = Some(false);
        } else if meta.path.is_ident("unique") {
            result.unique = true;
        } else if meta.path.is_ident("primary") {
            result.primary = true;
        } else if meta.path.is_ident("default") {
            result.default = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("default_sql") {
            result.default_sql = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("check") {
            result.check = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unknown column attribute"));
        }
        Ok(())
    })?;

    let Some(sql_type) = &result.sql_type else {
        return Err(syn::Error::new_spanned(attr, "column requires `sql_type`"));
    };
    if result.default.is_some() && result.default_sql.is_some() {
        return Err(syn::Error::new_spanned(
            attr,
            "`default` and `default_sql` are mutually exclusive",
        ));
    }

    let name = result.name.as_ref().map(|n| quote! { .name(#n) });
    let nullable = result.nullable.map(|n| quote! { .nullable(#n) });
    let unique = result.unique.then(|| quote! { .unique() });
    let primary = result.primary.then(|| quote! { .primary() });
    let default = match (&result.default, &result.default_sql) {
        (Some(expr), _) => Some(quote! { .default(#expr) }),
        (None, Some(sql)) => Some(quote! { .default_sql(#sql) }),
        (None, None) => None,
    };
    let check = result.check.as_ref().map(|c| quote! { .check(#c) });
    let references = result.foreign_key.reference.as_ref().map(|reference| {
        let foreign_key = result.foreign_key.to_tokens(reference);
        quote! { .references(#foreign_key) }
    });
    if references.is_none()
        && (result.foreign_key.on_delete.is_some() || result.foreign_key.on_update.is_some())
    {
        return Err(syn::Error::new_spanned(
            attr,
            "`on_delete` and `on_update` require `references`",
        ));
    }

    Ok(quote! {
        .column(
            ::sqlweave_core::schema::Column::new(#property, #sql_type)
                #name
                #nullable
                #unique
                #primary
                #default
                #check
                #references
        )
    })
}

fn table_declaration(attrs: &[Attribute]) -> syn::Result<Option<TokenStream2>> {
    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        if matches!(attr.meta, syn::Meta::Path(_)) {
            return Ok(Some(quote! { .table() }));
        }
        let mut table_name: Option<LitStr> = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                table_name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown table attribute"))
            }
        })?;
        return Ok(Some(match table_name {
            Some(name) => quote! { .table_named(#name) },
            None => quote! { .table() },
        }));
    }
    Ok(None)
}

fn struct_declarations(attrs: &[Attribute]) -> syn::Result<Vec<TokenStream2>> {
    let mut declarations = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("primary_key") {
            let columns = string_list(attr)?;
            if columns.is_empty() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "primary_key on a struct requires at least one column",
                ));
            }
            declarations.push(quote! { .primary_key([#(#columns),*]) });
        } else if attr.path().is_ident("foreign_key") {
            let fk = parse_foreign_key(attr)?;
            let (Some(reference), Some(_)) = (&fk.reference, &fk.column) else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "foreign_key on a struct requires `column` and `reference`",
                ));
            };
            let foreign_key = fk.to_tokens(reference);
            declarations.push(quote! { .foreign_key(#foreign_key) });
        } else if attr.path().is_ident("index") {
            declarations.push(index_declaration(attr)?);
        }
    }

    Ok(declarations)
}

fn index_declaration(attr: &Attribute) -> syn::Result<TokenStream2> {
    let mut name: Option<LitStr> = None;
    let mut columns: Vec<LitStr> = Vec::new();
    let mut unique = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("columns") {
            let content;
            syn::parenthesized!(content in meta.input);
            let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
            columns.extend(list);
        } else if meta.path.is_ident("unique") {
            unique = true;
        } else {
            return Err(meta.error("unknown index attribute"));
        }
        Ok(())
    })?;

    let Some(name) = name else {
        return Err(syn::Error::new_spanned(attr, "index requires `name`"));
    };
    if columns.is_empty() {
        return Err(syn::Error::new_spanned(attr, "index requires `columns(...)`"));
    }
    let unique = unique.then(|| quote! { .unique() });

    Ok(quote! {
        .index(::sqlweave_core::schema::Index::new(#name, [#(#columns),*]) #unique)
    })
}

fn parse_foreign_key(attr: &Attribute) -> syn::Result<ForeignKeyAttrs> {
    let mut result = ForeignKeyAttrs::default();
    attr.parse_nested_meta(|meta| {
        if result.parse_entry(&meta, "reference")? {
            return Ok(());
        }
        if meta.path.is_ident("column") {
            result.column = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unknown foreign_key attribute"))
        }
    })?;
    Ok(result)
}

/// Parses `#[attr]` or `#[attr("a", "b")]` into string literals.
fn string_list(attr: &Attribute) -> syn::Result<Vec<LitStr>> {
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(Vec::new());
    }
    let list = attr.parse_args_with(Punctuated::<Lit, Token![,]>::parse_terminated)?;
    list.into_iter()
        .map(|lit| match lit {
            Lit::Str(s) => Ok(s),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        })
        .collect()
}

fn parse_cascade(lit: &LitStr) -> syn::Result<Ident> {
    let normalized = lit
        .value()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase();
    let variant = match normalized.as_str() {
        "RESTRICT" => "Restrict",
        "CASCADE" => "Cascade",
        "SET NULL" => "SetNull",
        "SET DEFAULT" | "DEFAULT" => "Default",
        "NO ACTION" => "NoAction",
        _ => {
            return Err(syn::Error::new_spanned(
                lit,
                "expected RESTRICT, CASCADE, SET NULL, SET DEFAULT or NO ACTION",
            ));
        }
    };
    Ok(format_ident!("{}", variant))
}
