//! Add-to-cart form for the ATG `CartModifierFormHandler`.
//!
//! The handler expects every data field to be followed by a `_D:` companion
//! (value `" "`) and rejects submissions whose callback URLs disagree with the
//! SKU, product ID or locale of the request.

const HANDLER: &str = "/atg/commerce/order/purchase/CartModifierFormHandler";
const FORM_JSP: &str = "/collections/productSheet/forms/addToCartForm.jsp";
const DARGS: &str = "/mobile/collections/productSheet/forms/addToCartForm.jsp";

/// Desktop Chrome user agent sent with the cart POST.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/59.0.3071.115 Safari/537.36";

/// Form submission for a single SKU, quantity 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartForm {
    sku: String,
    product_id: String,
    locale: String,
}

impl CartForm {
    /// Creates a form. `sku` must already be normalized.
    pub fn new(
        sku: impl Into<String>,
        product_id: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self { sku: sku.into(), product_id: product_id.into(), locale: locale.into() }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Callback URL the handler forwards to after a successful add.
    pub fn success_url(&self) -> String {
        format!("{}&addToCartSuccess=true", self.error_url())
    }

    /// Callback URL the handler forwards to on failure.
    pub fn error_url(&self) -> String {
        format!(
            "{}?storeLang={}&productId={}&skuId={}&isMoM=false&priceButtonMom=",
            FORM_JSP, self.locale, self.product_id, self.sku
        )
    }

    /// Returns the ordered field list, companions included.
    pub fn fields(&self) -> Vec<(String, String)> {
        let data = [
            ("catalogRefIds", self.sku.clone()),
            ("productId", self.product_id.clone()),
            ("HSOptionsAsString", "{}".to_string()),
            ("quantity", "1".to_string()),
            ("useForwards", "true".to_string()),
            ("addItemToOrder", "--".to_string()),
            ("addItemToOrderSuccessURL", self.success_url()),
            ("addItemToOrderErrorURL", self.error_url()),
        ];

        let mut fields = Vec::with_capacity(data.len() * 2 + 2);
        fields.push(("_dyncharset".to_string(), "UTF-8".to_string()));

        for (property, value) in data {
            let name = format!("{}.{}", HANDLER, property);
            let companion = format!("_D:{}", name);
            fields.push((name, value));
            fields.push((companion, " ".to_string()));
        }

        fields.push(("_DARGS".to_string(), DARGS.to_string()));
        fields
    }

    /// Encodes the fields as an `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> String {
        self.fields()
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Form-urlencodes a key or value (space as `+`).
fn encode_component(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CartForm {
        CartForm::new("N64002", "nvprod470028v", "eng-gb")
    }

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_field_order_and_companions() {
        let fields = form().fields();
        assert_eq!(fields.len(), 18);
        assert_eq!(fields[0], ("_dyncharset".to_string(), "UTF-8".to_string()));
        assert_eq!(fields.last().unwrap().0, "_DARGS");

        // Every handler field is immediately followed by its companion.
        for pair in fields[1..fields.len() - 1].chunks(2) {
            assert!(pair[0].0.starts_with(HANDLER), "{:?}", pair[0]);
            assert_eq!(pair[1].0, format!("_D:{}", pair[0].0));
            assert_eq!(pair[1].1, " ");
        }
    }

    #[test]
    fn test_data_fields() {
        let fields = form().fields();
        let get = |p: &str| field(&fields, &format!("{}.{}", HANDLER, p)).map(String::from);

        assert_eq!(get("catalogRefIds").as_deref(), Some("N64002"));
        assert_eq!(get("productId").as_deref(), Some("nvprod470028v"));
        assert_eq!(get("HSOptionsAsString").as_deref(), Some("{}"));
        assert_eq!(get("quantity").as_deref(), Some("1"));
        assert_eq!(get("useForwards").as_deref(), Some("true"));
        assert_eq!(get("addItemToOrder").as_deref(), Some("--"));
    }

    #[test]
    fn test_callback_urls_embed_request_values() {
        let form = form();
        assert_eq!(
            form.error_url(),
            "/collections/productSheet/forms/addToCartForm.jsp?storeLang=eng-gb&productId=nvprod470028v&skuId=N64002&isMoM=false&priceButtonMom="
        );
        assert_eq!(form.success_url(), format!("{}&addToCartSuccess=true", form.error_url()));

        for url in [form.success_url(), form.error_url()] {
            assert!(url.contains("storeLang=eng-gb"));
            assert!(url.contains("productId=nvprod470028v"));
            assert!(url.contains("skuId=N64002"));
        }
    }

    #[test]
    fn test_encode() {
        let body = form().encode();
        assert!(body.starts_with("_dyncharset=UTF-8&%2Fatg%2Fcommerce%2Forder%2Fpurchase%2FCartModifierFormHandler.catalogRefIds=N64002&_D%3A%2Fatg"));
        assert!(body.contains("HSOptionsAsString=%7B%7D"));
        assert!(body.contains("CartModifierFormHandler.productId=nvprod470028v&"));
        assert!(body.contains("storeLang%3Deng-gb%26productId%3Dnvprod470028v%26skuId%3DN64002"));
        assert!(body.ends_with(
            "_DARGS=%2Fmobile%2Fcollections%2FproductSheet%2Fforms%2FaddToCartForm.jsp"
        ));
    }

    #[test]
    fn test_encode_component_space() {
        assert_eq!(encode_component(" "), "+");
        assert_eq!(encode_component("a b&c"), "a+b%26c");
    }
}
