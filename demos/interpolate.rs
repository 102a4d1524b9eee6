use chebbasis::{errors::ChebError, ChebychevBasis, DerivativeOrder, LinearBasis};

fn main() -> Result<(), ChebError>
{
    // Interpolate f(x) = exp(x) over (0, 2) and compare against the exact values.
    let basis = ChebychevBasis::new(0.0, 2.0, 12);
    println!("{basis}");
    let coefficients = basis.fit(f64::exp)?;
    let coefficients = coefficients.as_slice().unwrap_or_default();

    let x = [0.1, 0.5, 1.0, 1.7];
    let values = basis.interpolate(coefficients, &x, DerivativeOrder::Value)?;
    let derivatives = basis.interpolate(coefficients, &x, DerivativeOrder::First)?;
    for (i, &xi) in x.iter().enumerate()
    {
        println!("x={xi:.2} f={:.12} err={:.3e} f'={:.12} err={:.3e}",
            values[i], (values[i] - xi.exp()).abs(), derivatives[i], (derivatives[i] - xi.exp()).abs());
    }

    // Second derivatives are not available.
    if let Err(e) = basis.eval_order(&x, 2)
    {
        println!("order 2: {e}");
    }
    Ok(())
}
