//! Proc macros for the widgetcheck consistency harness.
//!
//! Provides the `#[consistency_test]` attribute macro for scenario tests.
//!
//! # Example
//!
//! ```ignore
//! use widgetcheck_test::consistency_test;
//!
//! #[consistency_test]
//! fn test_list_double_click() {
//!     harness.consistency_event(10, 10, 1, 0, "DoubleClick");
//! }
//!
//! #[consistency_test(should_panic)]
//! fn test_button_is_not_a_list() {
//!     harness.consistency_event(5, 5, 1, 0, "MouseSelection");
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Ident, ItemFn, ReturnType, Token,
};

/// Parsed attributes for `#[consistency_test]`.
#[derive(Default)]
struct ConsistencyTestAttrs {
    should_panic: bool,
    ignore: bool,
}

impl Parse for ConsistencyTestAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            let ident_str = ident.to_string();

            match ident_str.as_str() {
                "should_panic" => attrs.should_panic = true,
                "ignore" => attrs.ignore = true,
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident_str}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(attrs)
    }
}

/// Test attribute for consistency scenarios.
///
/// The generated test installs the harness's test tracing subscriber, then
/// returns early (after logging the skip) when synthetic input is unavailable
/// in this environment.
///
/// # Attributes
///
/// - `should_panic` - Expect the scenario to fail. A skipped run panics too,
///   so it is never mistaken for a pass.
/// - `ignore` - Skip this test by default
#[proc_macro_attribute]
pub fn consistency_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = parse_macro_input!(attr as ConsistencyTestAttrs);

    TokenStream::from(impl_consistency_test(&input, &attrs))
}

fn impl_consistency_test(input: &ItemFn, attrs: &ConsistencyTestAttrs) -> TokenStream2 {
    let fn_name = input.sig.ident.to_string();
    let fn_body = &input.block;
    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_sig = &input.sig;

    let test_attr = if attrs.should_panic {
        quote! { #[test] #[should_panic] }
    } else {
        quote! { #[test] }
    };

    let ignore_attr = if attrs.ignore {
        quote! { #[ignore] }
    } else {
        quote! {}
    };

    let skip = if attrs.should_panic {
        quote! { ::core::panic!("{} skipped: input injection unavailable", #fn_name); }
    } else {
        match &input.sig.output {
            ReturnType::Default => quote! { return; },
            ReturnType::Type(..) => quote! { return ::core::result::Result::Ok(()); },
        }
    };

    quote! {
        #(#fn_attrs)*
        #test_attr
        #ignore_attr
        #fn_vis #fn_sig {
            let _ = ::widgetcheck_test::logging::try_init_test_tracing();
            if !::widgetcheck_test::capability::input_injection_available() {
                ::widgetcheck_test::capability::report_skip(#fn_name);
                #skip
            }
            #fn_body
        }
    }
}
