use stylehub_api::StorefrontClient;
use stylehub_checkout::{load_faqs, load_settings};

pub(crate) async fn run_faqs(client: &StorefrontClient) -> anyhow::Result<()> {
    let faqs = load_faqs(client).await;
    if faqs.is_empty() {
        println!("no FAQs available");
        return Ok(());
    }
    for faq in &faqs {
        println!("Q: {}", faq.question);
        println!("A: {}", faq.answer);
        println!();
    }
    Ok(())
}

pub(crate) async fn run_settings(client: &StorefrontClient) -> anyhow::Result<()> {
    let settings = load_settings(client).await;
    let show = |value: Option<&str>| value.unwrap_or("(default)").to_string();
    println!("logo:    {}", show(settings.logo.as_deref()));
    println!("phone:   {}", show(settings.phone_number.as_deref()));
    println!("favicon: {}", show(settings.favicon.as_deref()));
    Ok(())
}
