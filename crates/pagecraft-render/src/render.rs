//! Document rendering
//!
//! `render` is a pure function from (document, theme) to a [`RenderedPage`].
//! The input is merged over the built-in defaults first, so a partial or
//! even empty document always renders: hero and form anchor the page, item
//! sections appear only when they have items, video and demo only when their
//! anchor leaf is set.

use crate::glyphs::{glyph, glyph_or_fallback};
use crate::page::{
    FeatureCard, FormFieldView, PricingCard, ProductCard, RenderedPage, RenderedSection, StatCard,
    TestimonialCard,
};
use crate::theme::{StyleSheet, Theme};
use pagecraft_schema::{
    merge_with_defaults, ContentDoc, ContentSchema, PricingPlan, Product, SchemaError,
};

/// Render a content document under a theme
///
/// Fixed section order: hero, features, stats, products, video,
/// testimonials, pricing, demo, form, social proof.
///
/// # Errors
/// Returns error only on shape mismatches the merge cannot absorb (e.g. a
/// scalar where a section object is required, duplicate form field names).
pub fn render(doc: &ContentDoc, theme: &Theme) -> Result<RenderedPage, RenderError> {
    let merged = merge_with_defaults(doc);
    let schema = ContentSchema::from_doc(&merged)?;
    let styles = StyleSheet::resolve(doc, theme);

    let mut sections = Vec::with_capacity(10);

    sections.push(RenderedSection::Hero {
        title: schema.hero.title.clone(),
        subtitle: schema.hero.subtitle.clone(),
        cta_text: schema.hero.cta_text.clone(),
        cta_link: schema.hero.cta_link.clone(),
        image: schema.hero.image.clone(),
        badge: schema.hero.badge.clone(),
    });

    if schema.features.is_renderable() {
        sections.push(RenderedSection::Features {
            title: schema.features.title.clone(),
            subtitle: schema.features.subtitle.clone(),
            items: schema
                .features
                .items
                .iter()
                .map(|f| FeatureCard {
                    glyph: glyph_or_fallback(f.icon.as_deref()).to_string(),
                    title: f.title.clone(),
                    description: f.description.clone(),
                })
                .collect(),
        });
    }

    if schema.stats.is_renderable() {
        sections.push(RenderedSection::Stats {
            title: schema.stats.title.clone(),
            items: schema
                .stats
                .items
                .iter()
                .map(|s| StatCard {
                    glyph: s.icon.as_deref().map(|i| glyph(i).to_string()),
                    value: s.value.clone(),
                    label: s.label.clone(),
                })
                .collect(),
        });
    }

    if schema.products.is_renderable() {
        sections.push(RenderedSection::Products {
            title: schema.products.title.clone(),
            subtitle: schema.products.subtitle.clone(),
            items: schema
                .products
                .items
                .iter()
                .enumerate()
                .map(|(index, p)| product_card(index, p))
                .collect(),
        });
    }

    if let Some(video) = schema.video.as_ref() {
        if let Some(url) = video.url.as_deref().filter(|u| !u.is_empty()) {
            sections.push(RenderedSection::Video {
                title: video.title.clone(),
                url: url.to_string(),
                caption: video.caption.clone(),
            });
        }
    }

    if schema.testimonials.is_renderable() {
        sections.push(RenderedSection::Testimonials {
            title: schema.testimonials.title.clone(),
            items: schema
                .testimonials
                .items
                .iter()
                .map(|t| TestimonialCard {
                    name: t.name.clone(),
                    role: t.role.clone(),
                    quote: t.quote.clone(),
                    avatar: t.avatar.clone(),
                    rating: t.rating.map(|r| r.clamp(1, 5)),
                })
                .collect(),
        });
    }

    if schema.pricing.is_renderable() {
        sections.push(RenderedSection::Pricing {
            title: schema.pricing.title.clone(),
            items: schema.pricing.items.iter().map(pricing_card).collect(),
        });
    }

    if let Some(demo) = schema.demo.as_ref() {
        if let Some(embed_url) = demo.embed_url.as_deref().filter(|u| !u.is_empty()) {
            sections.push(RenderedSection::Demo {
                title: demo.title.clone(),
                embed_url: embed_url.to_string(),
                instructions: demo.instructions.clone(),
            });
        }
    }

    sections.push(RenderedSection::Form {
        title: schema.form.title.clone(),
        subtitle: schema.form.subtitle.clone(),
        fields: schema
            .form
            .fields
            .iter()
            .map(|f| FormFieldView {
                name: f.name.clone(),
                label: f.label.clone(),
                field_type: f.field_type.clone(),
                required: f.required,
                glyph: f.icon.as_deref().map(|i| glyph(i).to_string()),
            })
            .collect(),
        submit_text: schema.form.submit_text.clone(),
        success_message: schema.form.success_message.clone(),
    });

    if schema.social_proof.is_renderable() {
        sections.push(RenderedSection::SocialProof {
            title: schema.social_proof.title.clone(),
            items: schema.social_proof.items.clone(),
        });
    }

    tracing::debug!(sections = sections.len(), "rendered page");

    Ok(RenderedPage { styles, sections })
}

fn product_card(index: usize, product: &Product) -> ProductCard {
    ProductCard {
        identity: product
            .id
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string),
        name: product.name.clone(),
        price_label: format_price(product.price, product.currency.as_deref()),
        description: product.description.clone(),
        image: product
            .image
            .clone()
            .or_else(|| product.images.first().cloned()),
        category: product.category.clone(),
        in_stock: product.stock.map(|s| s > 0),
        cta_text: product.cta_button.clone(),
        features: product.features.clone(),
    }
}

fn pricing_card(plan: &PricingPlan) -> PricingCard {
    PricingCard {
        name: plan.name.clone(),
        price_label: format_price(plan.price, plan.currency.as_deref()),
        period: plan.period.clone(),
        features: plan.features.clone(),
        cta_text: plan.cta_text.clone(),
        highlighted: plan.highlighted,
    }
}

/// Format a price with its currency symbol
///
/// Integral prices drop the decimals ("$10"); fractional prices keep two
/// ("€10.50"). Unknown currency codes fall back to "$".
#[must_use]
pub fn format_price(price: f64, currency: Option<&str>) -> String {
    let symbol = currency_symbol(currency);
    if (price - price.trunc()).abs() < f64::EPSILON {
        format!("{symbol}{}", price.trunc() as i64)
    } else {
        format!("{symbol}{price:.2}")
    }
}

fn currency_symbol(code: Option<&str>) -> &'static str {
    match code {
        Some("EUR") => "€",
        Some("GBP") => "£",
        Some("JPY") => "¥",
        Some("BRL") => "R$",
        Some("INR") => "₹",
        _ => "$",
    }
}

/// Renderer errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The merged document still failed to type
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
