// src/ai/prompts.rs
//! Prompt templates and the local fallback answers used without an AI key.
//!
//! Caller values are interpolated verbatim.

use super::models::SoilReading;

pub const INVALID_KEY_MESSAGE: &str =
    "Invalid API key. Please check your GOOGLE_AI_API_KEY in the .env file.";

pub fn insights_prompt(reading: &SoilReading) -> String {
    format!(
        "You are an agricultural expert. Analyze the following soil conditions and provide detailed recommendations:

Soil pH: {ph}
Moisture Level: {moisture}%
Crop Type: {crop}

Please provide:
1. Analysis of the current soil conditions
2. Specific recommendations for improving soil health
3. Best practices for growing {crop} in these conditions
4. Fertilizer and amendment suggestions
5. Irrigation recommendations

Keep the response practical and actionable for farmers.",
        ph = reading.ph,
        moisture = reading.moisture,
        crop = reading.crop,
    )
}

pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are an AI assistant specialized in agriculture, soil health, and farming.
A farmer is asking: \"{}\"

Provide a helpful, practical, and friendly response. Keep it concise but informative.",
        message
    )
}

fn ph_advice(ph: f64) -> &'static str {
    if ph < 5.5 {
        "Soil is strongly acidic; apply agricultural lime and retest in 6-8 weeks."
    } else if ph < 6.0 {
        "Soil is slightly acidic; a light lime application will suit most crops."
    } else if ph <= 7.5 {
        "pH is within the suitable range; maintain it with regular organic matter."
    } else {
        "Soil is alkaline; work in sulphur or acidifying compost."
    }
}

fn moisture_advice(moisture: f64) -> &'static str {
    if moisture < 20.0 {
        "Moisture is low; irrigate deeply and mulch to reduce evaporation."
    } else if moisture <= 60.0 {
        "Moisture is adequate; keep a regular irrigation schedule."
    } else {
        "Moisture is high; improve drainage and avoid over-watering."
    }
}

/// Deterministic insight text, no network call
pub fn local_insights(reading: &SoilReading) -> String {
    format!(
        "For crop {}, pH {}, moisture {}%. Recommendation: {} {}",
        reading.crop,
        reading.ph,
        reading.moisture,
        ph_advice(reading.ph),
        moisture_advice(reading.moisture)
    )
}

pub fn local_chat_reply(message: &str) -> String {
    format!(
        "You asked: \"{}\". The AI assistant is offline, so here is general guidance: \
         test soil pH and moisture each season, add organic matter, and rotate crops \
         to keep the soil healthy.",
        message
    )
}
