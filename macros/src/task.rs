//  TASK.rs
//    by Lut99
//
//  Created:
//    09 Oct 2026, 10:12:40
//  Last edited:
//    15 Oct 2026, 11:31:05
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`task!()`]-macro.
//

use proc_macro2::{Literal, Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote, quote_spanned};
use syn::ext::IdentExt as _;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned as _;
use syn::token::{Brace, Bracket, Colon, Comma, Semi};
use syn::{Error, Ident, LitInt, LitStr, Path, Token, braced, bracketed};


/***** KEYWORDS *****/
mod kw {
    syn::custom_keyword!(facts);
    syn::custom_keyword!(init);
    syn::custom_keyword!(goal);
    syn::custom_keyword!(pre);
    syn::custom_keyword!(add);
    syn::custom_keyword!(del);
    syn::custom_keyword!(cost);
}





/***** AST *****/
/// The attributes given at the start of the macro.
struct TaskAttributes {
    /// The path to the `strips`-crate.
    crate_path: Path,
}
impl Parse for TaskAttributes {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut crate_path: Path = syn::parse_quote!(::strips);
        while input.peek(Token![#]) && input.peek2(Token![!]) {
            let _hash: Token![#] = input.parse()?;
            let _excl: Token![!] = input.parse()?;
            let content;
            let _bracket: Bracket = bracketed!(content in input);

            // Only `crate` and `crate = <path>` are known
            let krate: Token![crate] = content.parse()?;
            if content.peek(Token![=]) {
                let _eq: Token![=] = content.parse()?;
                crate_path = content.parse()?;
            } else {
                crate_path = syn::parse_quote_spanned!(krate.span => crate);
            }
            if !content.is_empty() {
                return Err(content.error("Expected nothing after the crate path"));
            }
        }
        Ok(Self { crate_path })
    }
}



/// A name of a fact or operator, either as an identifier or as a string literal.
struct Name(LitStr);
impl Parse for Name {
    #[inline]
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            if lit.value().is_empty() {
                return Err(Error::new(lit.span(), "Names cannot be empty"));
            }
            Ok(Self(lit))
        } else {
            let ident: Ident = input.call(Ident::parse_any)?;
            Ok(Self(LitStr::new(&ident.to_string(), ident.span())))
        }
    }
}
impl ToTokens for Name {
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream2) { self.0.to_tokens(tokens) }
}

/// A braced, comma-separated list of [`Name`]s.
struct Names {
    brace: Brace,
    names: Punctuated<Name, Comma>,
}
impl Parse for Names {
    #[inline]
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let content;
        let brace: Brace = braced!(content in input);
        let names: Punctuated<Name, Comma> = content.parse_terminated(Name::parse, Comma)?;
        Ok(Self { brace, names })
    }
}
impl ToTokens for Names {
    /// Serializes as an array of string slices, typed explicitly so that empty lists work.
    #[inline]
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let names = self.names.iter();
        let len: Literal = Literal::usize_unsuffixed(self.names.len());
        tokens.extend(quote_spanned! { self.brace.span.join() => [#(#names),*] as [&'static str; #len] });
    }
}



/// One of the sections at the top of the task.
enum Section {
    Facts(Names),
    Init(Names),
    Goal(Names),
}
impl Section {
    /// Checks whether the input continues with a section instead of an operator.
    #[inline]
    fn peek(input: ParseStream) -> bool {
        (input.peek(kw::facts) || input.peek(kw::init) || input.peek(kw::goal)) && input.peek2(Brace)
    }
}
impl Parse for Section {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(kw::facts) {
            let _kw: kw::facts = input.parse()?;
            Ok(Self::Facts(input.parse()?))
        } else if input.peek(kw::init) {
            let _kw: kw::init = input.parse()?;
            Ok(Self::Init(input.parse()?))
        } else {
            let _kw: kw::goal = input.parse()?;
            Ok(Self::Goal(input.parse()?))
        }
    }
}

/// An operator definition, e.g., `drive: pre { home } add { work } del { home } cost 3;`.
struct OperatorDef {
    name: Name,
    pre:  Option<Names>,
    add:  Option<Names>,
    del:  Option<Names>,
    /// Not checked to be non-negative; the builder reports that.
    cost: i64,
    span: Span,
}
impl Parse for OperatorDef {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Name = input.parse()?;
        let _colon: Colon = input.parse()?;

        // The clauses may come in any order, but only once each
        let (mut pre, mut add, mut del, mut cost): (Option<Names>, Option<Names>, Option<Names>, Option<i64>) = (None, None, None, None);
        while !input.peek(Semi) {
            let lookahead = input.lookahead1();
            if lookahead.peek(kw::pre) {
                let tok: kw::pre = input.parse()?;
                if pre.replace(input.parse()?).is_some() {
                    return Err(Error::new(tok.span, "Duplicate preconditions"));
                }
            } else if lookahead.peek(kw::add) {
                let tok: kw::add = input.parse()?;
                if add.replace(input.parse()?).is_some() {
                    return Err(Error::new(tok.span, "Duplicate add-effects"));
                }
            } else if lookahead.peek(kw::del) {
                let tok: kw::del = input.parse()?;
                if del.replace(input.parse()?).is_some() {
                    return Err(Error::new(tok.span, "Duplicate delete-effects"));
                }
            } else if lookahead.peek(kw::cost) {
                let tok: kw::cost = input.parse()?;
                let neg: Option<Token![-]> = input.parse()?;
                let lit: LitInt = input.parse()?;
                let value: i64 = lit.base10_parse()?;
                if cost.replace(if neg.is_some() { -value } else { value }).is_some() {
                    return Err(Error::new(tok.span, "Duplicate cost"));
                }
            } else {
                return Err(lookahead.error());
            }
        }
        let semi: Semi = input.parse()?;

        let span: Span = name.0.span().join(semi.span).unwrap_or_else(|| name.0.span());
        Ok(Self { name, pre, add, del, cost: cost.unwrap_or(1), span })
    }
}
impl OperatorDef {
    /// Serializes the operator as a call to `TaskBuilder::push_operator()`.
    ///
    /// # Arguments
    /// - `builder`: The identifier of the builder to push to.
    ///
    /// # Returns
    /// A [`TokenStream2`] with the call.
    fn serialize(&self, builder: &Ident) -> TokenStream2 {
        let empty = || quote! { [] as [&'static str; 0] };
        let name: &Name = &self.name;
        let pre: TokenStream2 = self.pre.as_ref().map(ToTokens::to_token_stream).unwrap_or_else(empty);
        let add: TokenStream2 = self.add.as_ref().map(ToTokens::to_token_stream).unwrap_or_else(empty);
        let del: TokenStream2 = self.del.as_ref().map(ToTokens::to_token_stream).unwrap_or_else(empty);
        let cost: i64 = self.cost;
        quote_spanned! { self.span => #builder.push_operator(#name, #pre, #add, #del, #cost); }
    }
}





/***** LIBRARY *****/
/// Implements the `task!()`-macro.
///
/// # Arguments
/// - `input`: The input tokens to parse, as a [`ParseStream`].
///
/// # Returns
/// A [`TokenStream2`] with an expression that builds the task, evaluating to a
/// `Result<Task, task::Error>`.
///
/// # Errors
/// This function may error if the input is not a valid task definition.
pub fn task(input: ParseStream) -> Result<TokenStream2, Error> {
    // Parse from the input first: attributes
    let attrs: TaskAttributes = input.parse()?;
    let crate_path: &Path = &attrs.crate_path;

    // Then the sections and operators
    let builder: Ident = Ident::new("__strips_builder", Span::mixed_site());
    let mut calls: Vec<TokenStream2> = Vec::new();
    while Section::peek(input) {
        calls.push(match input.parse::<Section>()? {
            Section::Facts(names) => quote! { #builder = #builder.declare(#names); },
            Section::Init(names) => quote! { #builder = #builder.init(#names); },
            Section::Goal(names) => quote! { #builder = #builder.goal(#names); },
        });
    }
    while !input.is_empty() {
        calls.push(input.parse::<OperatorDef>()?.serialize(&builder));
    }

    // Write the remainder
    let span: Span = if let Some(first) = calls.first() { first.span() } else { Span::call_site() };
    Ok(quote_spanned! {
        span =>
        {
            #[allow(unused_mut)]
            let mut #builder = #crate_path::task::TaskBuilder::new();
            #(#calls)*
            #builder.build()
        }
    })
}
